mod health_check;
mod helpers;
mod load;
mod test_app;
mod uptime;
