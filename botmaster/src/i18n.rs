//! UI strings for the three supported languages. The selected language only
//! changes what is displayed, never how credentials are parsed or published.

use {
    crate::prelude::*,
    strum::IntoEnumIterator,
    strum_macros::{AsRefStr, Display, EnumIter, EnumString},
};

/// Label of the language selector. Shown in all languages at once since it is
/// the control used to pick one.
pub const LANGUAGE_SELECTOR_LABEL: &str =
    "🌐 Select Language / Selecciona idioma / Escolha o idioma";

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Pt,
}

impl Language {
    /// Parses a locale code, falling back to `default` for anything unknown.
    pub fn from_code_or(code: Option<&str>, default: Language) -> Language {
        code.and_then(|code| code.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Pt => &PT,
        }
    }

    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }
}

/// Every string the form displays for one language.
#[derive(Debug, Serialize)]
pub struct Labels {
    pub title: &'static str,
    pub description: &'static str,
    pub lang_label: &'static str,
    pub tab_upload: &'static str,
    pub tab_paste: &'static str,
    pub upload_sub: &'static str,
    pub upload_instructions: &'static str,
    pub paste_sub: &'static str,
    pub textarea_placeholder: &'static str,
    pub tweet_header: &'static str,
    pub tweet_area_label: &'static str,
    pub tweet_preview: &'static str,
    pub preview_button: &'static str,
    pub post_button: &'static str,
    pub no_creds: &'static str,
    /// `{count}` and `{accounts}` are substituted.
    pub post_success: &'static str,
    /// `{count}` is substituted.
    pub loaded_from_file: &'static str,
    /// `{count}` is substituted.
    pub loaded_from_text: &'static str,
    pub file_ignored: &'static str,
    pub modal_title: &'static str,
    pub modal_steps: &'static [&'static str],
    pub modal_close: &'static str,
}

impl Labels {
    pub fn post_success(&self, count: usize, accounts: usize) -> String {
        self.post_success
            .replace("{count}", &count.to_string())
            .replace("{accounts}", &accounts.to_string())
    }

    pub fn loaded(&self, count: usize, from_text: bool) -> String {
        let template = if from_text {
            self.loaded_from_text
        } else {
            self.loaded_from_file
        };

        template.replace("{count}", &count.to_string())
    }

    /// The info line shown while there is nothing to publish yet.
    pub fn tweet_prompt(&self) -> String {
        format!("⬆️ {}", self.tweet_area_label)
    }
}

const PLACEHOLDER: &str =
    "api_key,api_secret,access_token,access_secret\nKEY1,SECRET1,TOKEN1,ACCESS_SECRET1";

static EN: Labels = Labels {
    title: "🐦 Multi-Account Twitter Bot",
    description: "Post tweets from multiple Twitter/X accounts. Choose how you want to provide your credentials and paste your tweets.",
    lang_label: "🌐 Select Language",
    tab_upload: "📁 Upload CSV File",
    tab_paste: "📝 Paste CSV Text",
    upload_sub: "Upload a CSV file with your Twitter credentials",
    upload_instructions: "CSV must include the columns: api_key, api_secret, access_token, access_secret",
    paste_sub: "Paste your credentials as raw CSV text",
    textarea_placeholder: PLACEHOLDER,
    tweet_header: "✍️ Write your Tweets",
    tweet_area_label: "Enter one tweet per line:",
    tweet_preview: "Tweets Preview:",
    preview_button: "👀 Preview",
    post_button: "🚀 Post Tweets",
    no_creds: "⚠️ Please provide valid credentials above.",
    post_success: "✅ Posted {count} tweets from {accounts} accounts.",
    loaded_from_file: "✅ {count} loaded.",
    loaded_from_text: "✅ {count} loaded from text.",
    file_ignored: "ℹ️ Both a file and pasted text were provided. The pasted text is used and the file is ignored.",
    modal_title: "How to Use This App",
    modal_steps: &[
        "Choose your language using the dropdown above.",
        "Provide your Twitter API credentials via a CSV file or by pasting the text.",
        "Write one tweet per line.",
        "Click Post Tweets to publish from all accounts.",
    ],
    modal_close: "Close Guide",
};

static ES: Labels = Labels {
    title: "🐦 Bot de Twitter Multi-Cuenta",
    description: "Publica tweets desde varias cuentas de Twitter/X. Elige cómo ingresar tus credenciales y escribe tus tweets.",
    lang_label: "🌐 Selecciona idioma",
    tab_upload: "📁 Subir archivo CSV",
    tab_paste: "📝 Pegar texto CSV",
    upload_sub: "Sube un archivo CSV con tus credenciales de Twitter",
    upload_instructions: "El CSV debe incluir las columnas: api_key, api_secret, access_token, access_secret",
    paste_sub: "Pega tus credenciales como texto CSV sin procesar",
    textarea_placeholder: PLACEHOLDER,
    tweet_header: "✍️ Escribe tus Tweets",
    tweet_area_label: "Ingresa un tweet por línea:",
    tweet_preview: "Vista previa de tweets:",
    preview_button: "👀 Vista previa",
    post_button: "🚀 Publicar Tweets",
    no_creds: "⚠️ Primero debes cargar credenciales válidas.",
    post_success: "✅ Se publicaron {count} tweets desde {accounts} cuentas.",
    loaded_from_file: "✅ {count} cargadas.",
    loaded_from_text: "✅ {count} cargadas desde texto.",
    file_ignored: "ℹ️ Se proporcionaron un archivo y texto. Se usa el texto pegado y se ignora el archivo.",
    modal_title: "¿Cómo usar esta app?",
    modal_steps: &[
        "Elige tu idioma en el menú superior.",
        "Ingresa las credenciales vía archivo CSV o pegando texto.",
        "Escribe un tweet por línea.",
        "Haz clic en Publicar Tweets para enviarlos desde todas las cuentas.",
    ],
    modal_close: "Cerrar Guía",
};

static PT: Labels = Labels {
    title: "🐦 Bot do Twitter Multi-Conta",
    description: "Publique tweets de várias contas do Twitter/X. Escolha como fornecer suas credenciais e escreva seus tweets.",
    lang_label: "🌐 Escolha o idioma",
    tab_upload: "📁 Enviar arquivo CSV",
    tab_paste: "📝 Colar texto CSV",
    upload_sub: "Envie um arquivo CSV com suas credenciais do Twitter",
    upload_instructions: "O CSV deve conter as colunas: api_key, api_secret, access_token, access_secret",
    paste_sub: "Cole suas credenciais como texto CSV puro",
    textarea_placeholder: PLACEHOLDER,
    tweet_header: "✍️ Escreva seus Tweets",
    tweet_area_label: "Digite um tweet por linha:",
    tweet_preview: "Pré-visualização dos tweets:",
    preview_button: "👀 Pré-visualizar",
    post_button: "🚀 Publicar Tweets",
    no_creds: "⚠️ Forneça credenciais válidas acima.",
    post_success: "✅ Publicados {count} tweets de {accounts} contas.",
    loaded_from_file: "✅ {count} carregadas.",
    loaded_from_text: "✅ {count} carregadas do texto.",
    file_ignored: "ℹ️ Foram fornecidos um arquivo e texto. O texto colado é usado e o arquivo é ignorado.",
    modal_title: "Como usar este aplicativo",
    modal_steps: &[
        "Escolha seu idioma no menu acima.",
        "Forneça credenciais via arquivo CSV ou colando texto.",
        "Escreva um tweet por linha.",
        "Clique em Publicar Tweets para enviar de todas as contas.",
    ],
    modal_close: "Fechar Guia",
};

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(Some("en"), Language::En)]
    #[case(Some("es"), Language::Es)]
    #[case(Some("pt"), Language::Pt)]
    #[case(Some(" pt "), Language::Pt)]
    #[case(Some("fr"), Language::Es)]
    #[case(Some(""), Language::Es)]
    #[case(None, Language::Es)]
    fn test_language_codes(#[case] code: Option<&str>, #[case] expected: Language) {
        assert_eq!(Language::from_code_or(code, Language::Es), expected);
    }

    #[test]
    fn test_language_round_trips_through_code() {
        for language in Language::all() {
            assert_eq!(language.as_ref().parse::<Language>().unwrap(), language);
        }

        assert_eq!(Language::all().count(), 3);
    }

    #[test]
    fn test_post_success_formatting() {
        assert_eq!(
            Language::En.labels().post_success(6, 3),
            "✅ Posted 6 tweets from 3 accounts."
        );
        assert_eq!(
            Language::Es.labels().post_success(2, 1),
            "✅ Se publicaron 2 tweets desde 1 cuentas."
        );
    }

    #[test]
    fn test_loaded_messages() {
        let labels = Language::En.labels();

        assert_eq!(labels.loaded(2, false), "✅ 2 loaded.");
        assert_eq!(labels.loaded(2, true), "✅ 2 loaded from text.");
    }

    #[test]
    fn test_every_language_has_four_help_steps() {
        for language in Language::all() {
            assert_eq!(language.labels().modal_steps.len(), 4, "{language}");
        }
    }
}
