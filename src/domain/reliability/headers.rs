//! Request Headers - 按网络状态构建请求头

use http::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, ACCEPT, ACCEPT_ENCODING,
    AUTHORIZATION, CACHE_CONTROL, CONNECTION, CONTENT_TYPE, USER_AGENT,
};

use super::network::ConnectionQuality;

/// 固定的客户端标识
pub const CLIENT_USER_AGENT: &str = "rikkahub/tts-server-optimized";

const X_STREAM_MODE: HeaderName = HeaderName::from_static("x-stream-mode");
const PRIORITY: HeaderName = HeaderName::from_static("priority");

/// 构建合成请求的请求头
///
/// 鉴权、内容类型、客户端标识与 Accept 总是存在；
/// 连接、压缩与缓存策略随质量等级变化，流式模式下追加流式标记与优先级提示。
///
/// API Key 含有非法字符时返回 `InvalidHeaderValue`。
pub fn build_headers(
    api_key: &str,
    quality: ConnectionQuality,
    stream_mode: bool,
) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("audio/*"));

    let (connection, encoding, cache) = match quality {
        ConnectionQuality::Good => ("keep-alive", "gzip, deflate", "no-cache"),
        ConnectionQuality::Fair => ("keep-alive", "gzip", "no-cache"),
        ConnectionQuality::Poor => ("close", "identity", "no-store"),
    };
    headers.insert(CONNECTION, HeaderValue::from_static(connection));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(encoding));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache));

    if stream_mode {
        headers.insert(X_STREAM_MODE, HeaderValue::from_static("true"));
        headers.insert(PRIORITY, HeaderValue::from_static("u=1, i"));
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_common_headers_always_present() {
        let headers = build_headers("sk-test", ConnectionQuality::Good, false).unwrap();
        assert_eq!(value(&headers, "authorization"), Some("Bearer sk-test"));
        assert_eq!(value(&headers, "content-type"), Some("application/json"));
        assert_eq!(value(&headers, "user-agent"), Some(CLIENT_USER_AGENT));
        assert_eq!(value(&headers, "accept"), Some("audio/*"));
    }

    #[test]
    fn test_good_quality_headers() {
        let headers = build_headers("k", ConnectionQuality::Good, false).unwrap();
        assert_eq!(value(&headers, "connection"), Some("keep-alive"));
        assert_eq!(value(&headers, "accept-encoding"), Some("gzip, deflate"));
        assert_eq!(value(&headers, "cache-control"), Some("no-cache"));
        assert!(headers.get("x-stream-mode").is_none());
        assert!(headers.get("priority").is_none());
    }

    #[test]
    fn test_fair_quality_headers() {
        let headers = build_headers("k", ConnectionQuality::Fair, false).unwrap();
        assert_eq!(value(&headers, "connection"), Some("keep-alive"));
        assert_eq!(value(&headers, "accept-encoding"), Some("gzip"));
        assert_eq!(value(&headers, "cache-control"), Some("no-cache"));
    }

    #[test]
    fn test_poor_quality_headers() {
        let headers = build_headers("k", ConnectionQuality::Poor, false).unwrap();
        assert_eq!(value(&headers, "connection"), Some("close"));
        assert_eq!(value(&headers, "accept-encoding"), Some("identity"));
        assert_eq!(value(&headers, "cache-control"), Some("no-store"));
    }

    #[test]
    fn test_stream_mode_headers() {
        let headers = build_headers("k", ConnectionQuality::Poor, true).unwrap();
        assert_eq!(value(&headers, "x-stream-mode"), Some("true"));
        assert_eq!(value(&headers, "priority"), Some("u=1, i"));
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        assert!(build_headers("bad\nkey", ConnectionQuality::Good, false).is_err());
    }
}
