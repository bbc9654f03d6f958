//! Cookie Management Infrastructure
//!
//! Common cookie handling utilities. The session core sets more than one
//! cookie per response, so the flag set (HttpOnly/Secure/SameSite/Path)
//! is configured once and applied per cookie name.

use axum::http::{HeaderMap, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie attribute configuration shared by all session cookies
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build a Set-Cookie header value
    pub fn build_set_cookie(&self, name: &str, value: &str, max_age_secs: i64) -> String {
        let mut cookie = format!("{}={}", name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Max-Age={}", max_age_secs));

        cookie
    }

    /// Build a Set-Cookie header value that deletes the cookie
    pub fn build_delete_cookie(&self, name: &str) -> String {
        let mut cookie = format!("{}=; Max-Age=0", name);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; Path={}", self.path));

        cookie
    }
}

/// Extract a cookie value from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_build_set_cookie() {
        let config = CookieConfig {
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
        };

        let cookie = config.build_set_cookie("accessToken", "abc.def.ghi", 900);
        assert!(cookie.starts_with("accessToken=abc.def.ghi"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=900"));
    }

    #[test]
    fn test_build_delete_cookie() {
        let config = CookieConfig::default();
        let cookie = config.build_delete_cookie("refreshToken");
        assert!(cookie.starts_with("refreshToken=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_insecure_dev_config() {
        let config = CookieConfig {
            secure: false,
            ..Default::default()
        };
        let cookie = config.build_set_cookie("accessToken", "v", 60);
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; accessToken=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "accessToken"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
