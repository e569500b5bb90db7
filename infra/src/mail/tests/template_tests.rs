use mt_core::domain::entities::envelope::EmailBody;

use crate::mail::templates::{render_html, render_text};

fn body() -> EmailBody {
    EmailBody {
        url: "https://admin.example.com/email-verify/abc.def.ghi".to_string(),
        otp_code: "482913".to_string(),
        user_name: "Jane <Admin>".to_string(),
        email_purpose: "email verify".to_string(),
        company_name: "Acme & Co".to_string(),
        base_url: "https://admin.example.com".to_string(),
    }
}

#[test]
fn test_text_contains_code_and_url() {
    let text = render_text(&body()).unwrap();
    assert!(text.contains("482913"));
    assert!(text.contains("https://admin.example.com/email-verify/abc.def.ghi"));
    assert!(text.contains("email verify"));
    assert!(text.contains("Jane <Admin>"));
}

#[test]
fn test_html_contains_code_and_escapes_names() {
    let html = render_html(&body()).unwrap();
    assert!(html.contains("482913"));
    assert!(html.contains("email-verify"));
    assert!(html.contains("abc.def.ghi"));
    assert!(html.contains("Jane &lt;Admin&gt;"));
    assert!(html.contains("Acme &amp; Co"));
    assert!(!html.contains("<Admin>"));
}

#[test]
fn test_html_escapes_markup_in_every_field() {
    let mut body = body();
    body.email_purpose = "<script>alert(1)</script>".to_string();
    body.company_name = "\"quoted\" & co".to_string();

    let html = render_html(&body).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&quot;quoted&quot; &amp; co"));

    // The text body is sent verbatim
    let text = render_text(&body).unwrap();
    assert!(text.contains("<script>alert(1)</script>"));
}
