use reqwest::Url;

/// An absolute `http`/`https` URL the harness sends its GET requests to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(Url);

impl TargetUrl {
    pub fn parse(s: String) -> Result<TargetUrl, String> {
        let trimmed = s.trim();
        let url = Url::parse(trimmed).map_err(|e| format!("{} is not a valid URL: {}", s, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("{} must use the http or https scheme.", s));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(format!("{} does not name a host.", s));
        }
        Ok(Self(url))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl AsRef<str> for TargetUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
