//! Static HTML pages

pub const HOME: &str = include_str!("../../templates/home.html");
pub const LOGIN: &str = include_str!("../../templates/login.html");
pub const REGISTER: &str = include_str!("../../templates/register.html");
const SECRETS: &str = include_str!("../../templates/secrets.html");

/// The gated page, personalised with the signed-in email
pub fn secrets(email: &str) -> String {
    SECRETS.replace("{{email}}", &escape_html(email))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_page_escapes_email() {
        let page = secrets("<script>@example.com");
        assert!(page.contains("&lt;script&gt;@example.com"));
        assert!(!page.contains("<script>"));
        assert!(!page.contains("{{email}}"));
    }

    #[test]
    fn test_forms_post_to_their_routes() {
        assert!(LOGIN.contains(r#"action="/login""#));
        assert!(REGISTER.contains(r#"action="/register""#));
        assert!(LOGIN.contains(r#"name="username""#) && LOGIN.contains(r#"name="password""#));
    }
}
