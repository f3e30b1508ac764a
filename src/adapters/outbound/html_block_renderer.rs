//! HTML Block Renderer
//!
//! Implements BlockRenderer by swapping the document for a standalone
//! notice page and halting it.

use crate::domain::ports::BlockRenderer;
use crate::domain::value_objects::CountryCode;
use crate::infrastructure::document::Document;
use std::sync::Arc;

/// Text and colors of the block notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPageConfig {
    pub title: String,
    pub message_zh: String,
    pub message_en: String,
    /// Render a contact line with `contact_email`
    pub show_contact_info: bool,
    pub contact_email: String,
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
}

impl Default for BlockPageConfig {
    fn default() -> Self {
        Self {
            title: "访问受限 / Access Restricted".to_string(),
            message_zh: "抱歉，我们暂时无法为您所在的地区提供服务。".to_string(),
            message_en: "Sorry, we are currently unable to provide services to your region."
                .to_string(),
            show_contact_info: false,
            contact_email: "support@example.com".to_string(),
            background_color: "#f5f5f5".to_string(),
            text_color: "#333333".to_string(),
            accent_color: "#e74c3c".to_string(),
        }
    }
}

impl BlockPageConfig {
    /// Render the full notice page for `country`.
    pub fn render(&self, country: &CountryCode) -> String {
        let title = escape_html(&self.title);
        let bg = escape_html(&self.background_color);
        let fg = escape_html(&self.text_color);
        let accent = escape_html(&self.accent_color);

        let contact = if self.show_contact_info {
            let email = escape_html(&self.contact_email);
            format!(
                r#"<div class="contact-info">如有疑问，请联系 / For inquiries, please contact:<br><a href="mailto:{email}">{email}</a></div>"#
            )
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta name="robots" content="noindex, nofollow">
<title>{title}</title>
<style>
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background: {bg}; color: {fg}; display: flex; justify-content: center; align-items: center; min-height: 100vh; padding: 20px; }}
.container {{ max-width: 600px; background: white; border-radius: 12px; padding: 40px; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.1); text-align: center; }}
.icon {{ width: 80px; height: 80px; margin: 0 auto 24px; background: {accent}; border-radius: 50%; display: flex; align-items: center; justify-content: center; color: white; font-size: 40px; }}
h1 {{ font-size: 28px; margin-bottom: 16px; color: {fg}; }}
.message {{ font-size: 16px; line-height: 1.6; margin-bottom: 12px; color: #666; }}
.country-info {{ display: inline-block; background: #f8f9fa; padding: 8px 16px; border-radius: 6px; margin-top: 20px; font-size: 14px; color: #666; }}
.contact-info {{ margin-top: 30px; padding-top: 30px; border-top: 1px solid #e0e0e0; font-size: 14px; color: #666; }}
.contact-info a {{ color: {accent}; text-decoration: none; }}
</style>
</head>
<body>
<div class="container">
<div class="icon">🚫</div>
<h1>{title}</h1>
<p class="message">{message_zh}</p>
<p class="message">{message_en}</p>
<div class="country-info">检测到的位置 / Detected Location: {country}</div>
{contact}
</div>
</body>
</html>
"#,
            message_zh = escape_html(&self.message_zh),
            message_en = escape_html(&self.message_en),
            country = escape_html(country.as_str()),
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Block renderer that rewrites a [`Document`].
pub struct HtmlBlockRenderer {
    page: BlockPageConfig,
    document: Arc<Document>,
}

impl HtmlBlockRenderer {
    pub fn new(page: BlockPageConfig, document: Arc<Document>) -> Self {
        Self { page, document }
    }
}

impl BlockRenderer for HtmlBlockRenderer {
    fn render(&self, country: &CountryCode) {
        tracing::info!(country = %country, "rendering block page");

        if let Err(e) = self.document.replace_content(self.page.render(country)) {
            tracing::error!("block page not written, page stays halted: {}", e);
        }
        self.document.stop();
    }
}
