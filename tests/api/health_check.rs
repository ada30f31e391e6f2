use crate::test_app::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let test_app = spawn_app().await;
    // Act
    let response = test_app.get("/health_check").await;
    // Assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}
