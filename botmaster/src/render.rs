//! HTML rendering of the form page.

use {
    crate::{controller::Page, prelude::*},
    minijinja::Environment,
};

const INDEX_TEMPLATE: &str = "index.html";

/// Holds the compiled page template. HTML auto-escaping applies to every
/// value, so pasted text and API error reasons are inert when echoed back.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, BotmasterError> {
        let mut env = Environment::new();

        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;

        Ok(Self { env })
    }

    pub fn page(&self, page: &Page) -> Result<String, BotmasterError> {
        let html = self.env.get_template(INDEX_TEMPLATE)?.render(page)?;

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            controller::FormController,
            i18n::Language,
            notice::Notice,
            publish::tests::StubPublisher,
            session::SessionId,
        },
    };

    fn page(lang: &str) -> Page {
        FormController::new(StubPublisher::default(), Language::En)
            .show(&SessionId::generate(), Some(lang))
    }

    #[test]
    fn test_renders_selected_language() {
        let renderer = Renderer::new().unwrap();

        let html = renderer.page(&page("pt")).unwrap();

        assert!(html.contains("<html lang=\"pt\">"));
        assert!(html.contains("Bot do Twitter Multi-Conta"));
        assert!(html.contains("<option value=\"pt\" selected>"));
        assert!(html.contains("Como usar este aplicativo"));
    }

    #[test]
    fn test_escapes_echoed_text() {
        let renderer = Renderer::new().unwrap();
        let mut page = page("en");

        page.tweets_text = "<script>alert(1)</script>".to_string();
        page.posts = vec!["<b>bold</b>".to_string()];
        page.publish_notices = vec![Notice::error("❌ Error: <oops>")];

        let html = renderer.page(&page).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("❌ Error: &lt;oops&gt;"));
    }

    #[test]
    fn test_help_panel_hidden_when_closed() {
        let renderer = Renderer::new().unwrap();
        let mut page = page("en");

        assert!(renderer.page(&page).unwrap().contains("id=\"help\""));

        page.show_help = false;

        assert!(!renderer.page(&page).unwrap().contains("id=\"help\""));
    }
}
