//! Page-layout wrapper shared by all rendered pages.

use axum::http::{HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};
use std::fmt::Write as _;

use crate::api::common::{ACCOUNT_PATH, FLASH_COOKIE, Flash, FlashLevel, INVOICES_PATH};

/// How much site chrome a page gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStyle {
    /// Full navigation header and footer.
    Default,
    /// Bare content, used for printable pages such as a single invoice.
    Minimal,
}

/// Data the layout needs besides the page body.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub title: String,
    pub style: LayoutStyle,
}

impl PageLayout {
    pub fn new(title: impl Into<String>) -> Self {
        PageLayout {
            title: title.into(),
            style: LayoutStyle::Default,
        }
    }

    pub fn minimal(title: impl Into<String>) -> Self {
        PageLayout {
            title: title.into(),
            style: LayoutStyle::Minimal,
        }
    }
}

/// Escapes text for interpolation into HTML content.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Wraps `body` in the page layout and produces the 200 response.
///
/// When a flash was read off the inbound request it is rendered once and the
/// cookie is cleared on this response.
pub fn render_page(layout: &PageLayout, flash: Option<&Flash>, body: &str) -> Response {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n",
        escape_html(&layout.title)
    );

    if layout.style == LayoutStyle::Default {
        let _ = write!(
            html,
            "<header><nav><a href=\"{ACCOUNT_PATH}\">Account</a> <a href=\"{INVOICES_PATH}\">Payment history</a></nav></header>\n"
        );
    }

    if let Some(flash) = flash {
        let class = match flash.level {
            FlashLevel::Error => "flash flash-error",
            FlashLevel::Notice => "flash flash-notice",
        };
        let _ = write!(
            html,
            "<div class=\"{class}\">{}</div>\n",
            escape_html(&flash.message)
        );
    }

    html.push_str(body);

    if layout.style == LayoutStyle::Default {
        html.push_str("\n<footer>Billgate</footer>");
    }
    html.push_str("\n</body>\n</html>\n");

    let mut response = Html(html).into_response();
    if flash.is_some() {
        let clear = format!("{FLASH_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
        if let Ok(value) = HeaderValue::from_str(&clear) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn html_escaping_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[tokio::test]
    async fn default_layout_carries_navigation_chrome() {
        let response = render_page(&PageLayout::new("Payment history"), None, "<p>hi</p>");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let html = body_text(response).await;
        assert!(html.contains("<title>Payment history</title>"));
        assert!(html.contains("<nav>"));
        assert!(html.contains("<p>hi</p>"));
    }

    #[tokio::test]
    async fn minimal_layout_omits_chrome() {
        let response = render_page(&PageLayout::minimal("Invoice"), None, "<p>inv</p>");
        let html = body_text(response).await;
        assert!(!html.contains("<nav>"));
        assert!(!html.contains("<footer>"));
        assert!(html.contains("<p>inv</p>"));
    }

    #[tokio::test]
    async fn consumed_flash_is_rendered_and_cleared() {
        let flash = Flash::error("<oops>");
        let response = render_page(&PageLayout::new("T"), Some(&flash), "");

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.contains("Max-Age=0"));

        let html = body_text(response).await;
        assert!(html.contains("flash-error"));
        assert!(html.contains("&lt;oops&gt;"));
    }
}
