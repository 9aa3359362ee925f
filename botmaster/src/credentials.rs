//! Credential ingestion: turns an uploaded CSV file or pasted CSV text into
//! validated [Credential] records.

use {
    crate::{i18n::Labels, notice::Notice, prelude::*},
    social_twitter::TwitterAuth,
    std::fmt,
    thiserror::Error,
    zeroize::{Zeroize, ZeroizeOnDrop},
};

/// Column names every credential table must contain.
pub const REQUIRED_COLUMNS: [&str; 4] = ["api_key", "api_secret", "access_token", "access_secret"];

/// The four secrets needed to act as one Twitter account.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl Credential {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Short, non-secret label for logs: the last four characters of the API
    /// key.
    pub fn masked_key(&self) -> String {
        let tail: String = self
            .api_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        format!("***{tail}")
    }

    pub fn to_twitter_auth(&self) -> TwitterAuth {
        TwitterAuth::new(
            self.api_key.as_str(),
            self.api_secret.as_str(),
            self.access_token.as_str(),
            self.access_secret.as_str(),
        )
    }

    /// Name of the first required field that is empty, if any.
    fn first_empty_field(&self) -> Option<&'static str> {
        [
            ("api_key", &self.api_key),
            ("api_secret", &self.api_secret),
            ("access_token", &self.access_token),
            ("access_secret", &self.access_secret),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &self.masked_key())
            .finish_non_exhaustive()
    }
}

/// Where the credential table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Raw bytes of an uploaded file.
    File(Vec<u8>),
    /// Text pasted into the form.
    Text(String),
}

impl CredentialSource {
    /// Picks the source to ingest when the form may carry both. Pasted text
    /// that is not blank wins over an uploaded file. The returned flag tells
    /// whether a file was supplied and then ignored.
    pub fn choose(file: Option<Vec<u8>>, text: Option<String>) -> (Option<Self>, bool) {
        let text = text.filter(|text| !text.trim().is_empty());

        match (file, text) {
            (Some(_), Some(text)) => (Some(CredentialSource::Text(text)), true),
            (None, Some(text)) => (Some(CredentialSource::Text(text)), false),
            (Some(file), None) => (Some(CredentialSource::File(file)), false),
            (None, None) => (None, false),
        }
    }

    fn is_text(&self) -> bool {
        matches!(self, CredentialSource::Text(_))
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    /// The table could not be read as CSV. Carries the raw reader error.
    #[error("{0}")]
    Parse(#[from] csv::Error),
    /// One or more of [REQUIRED_COLUMNS] is not in the header row.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// A data row with an empty required cell. Rows count from 1, the header
/// excluded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: column `{column}` is empty")]
pub struct UnusableRow {
    pub row: usize,
    pub column: &'static str,
}

/// A parsed credential table: the usable records and the rows left out.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CredentialTable {
    pub credentials: Vec<Credential>,
    pub unusable: Vec<UnusableRow>,
}

/// Parses a credential table. Extra columns are ignored. Rows with an empty
/// required cell are skipped and reported, the other rows stay usable.
pub fn parse_credentials(data: &[u8]) -> Result<CredentialTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let headers = reader.headers()?.clone();

    let missing = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    let mut table = CredentialTable::default();

    for (index, record) in reader.deserialize::<Credential>().enumerate() {
        let credential = record?;

        match credential.first_empty_field() {
            Some(column) => table.unusable.push(UnusableRow {
                row: index + 1,
                column,
            }),
            None => table.credentials.push(credential),
        }
    }

    Ok(table)
}

#[derive(Debug, Default)]
pub struct Ingestion {
    pub credentials: Vec<Credential>,
    pub notices: Vec<Notice>,
}

/// Ingests `source`, producing the usable records and the messages to display.
/// Parse failures show the raw error, missing columns show the instructional
/// message, and both yield no records. Skipped rows get one warning each.
pub fn ingest(source: &CredentialSource, labels: &Labels) -> Ingestion {
    let result = match source {
        CredentialSource::File(bytes) => parse_credentials(bytes),
        CredentialSource::Text(text) => parse_credentials(text.trim().as_bytes()),
    };

    match result {
        Ok(CredentialTable {
            credentials,
            unusable,
        }) => {
            let mut notices = vec![Notice::success(
                labels.loaded(credentials.len(), source.is_text()),
            )];

            for row in &unusable {
                log::debug!("Skipping credential {row}");
            }

            notices.extend(unusable.iter().map(|row| Notice::warning(format!("⚠️ {row}"))));

            Ingestion {
                credentials,
                notices,
            }
        }
        Err(IngestError::MissingColumns(missing)) => {
            log::debug!("Credential table is missing columns: {:?}", missing);

            Ingestion {
                credentials: vec![],
                notices: vec![Notice::error(labels.upload_instructions)],
            }
        }
        Err(e) => Ingestion {
            credentials: vec![],
            notices: vec![Notice::error(e.to_string())],
        },
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{i18n::Language, notice::NoticeLevel},
        assert_matches::assert_matches,
        rstest::rstest,
    };

    const HEADER: &str = "api_key,api_secret,access_token,access_secret";

    #[test]
    fn test_single_record() {
        let table = format!("{HEADER}\nK1,S1,T1,AS1");

        let credentials = parse_credentials(table.as_bytes()).unwrap().credentials;

        assert_eq!(credentials, vec![Credential::new("K1", "S1", "T1", "AS1")]);
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let table = "label,access_secret,api_key,access_token,api_secret\n\
                     main,AS1,K1,T1,S1\n\
                     alt,AS2,K2,T2,S2\n";

        let credentials = parse_credentials(table.as_bytes()).unwrap().credentials;

        assert_eq!(
            credentials,
            vec![
                Credential::new("K1", "S1", "T1", "AS1"),
                Credential::new("K2", "S2", "T2", "AS2"),
            ]
        );
    }

    #[test]
    fn test_record_count_matches_rows() {
        let rows = (0..25)
            .map(|i| format!("K{i},S{i},T{i},AS{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let table = format!("{HEADER}\n{rows}");

        let credentials = parse_credentials(table.as_bytes()).unwrap().credentials;

        assert_eq!(credentials.len(), 25);
        assert_eq!(credentials[24], Credential::new("K24", "S24", "T24", "AS24"));
    }

    #[test]
    fn test_quoted_cells() {
        let table = format!("{HEADER}\n\"K,1\",S1,T1,\"A\"\"S1\"");

        let credentials = parse_credentials(table.as_bytes()).unwrap().credentials;

        assert_eq!(credentials[0].api_key, "K,1");
        assert_eq!(credentials[0].access_secret, "A\"S1");
    }

    #[rstest]
    #[case("api_secret,access_token,access_secret\nS1,T1,AS1", vec!["api_key"])]
    #[case("API_KEY,api_secret,access_token,access_secret\nK1,S1,T1,AS1", vec!["api_key"])]
    #[case("key,secret\nK1,S1", vec!["api_key", "api_secret", "access_token", "access_secret"])]
    #[case("", vec!["api_key", "api_secret", "access_token", "access_secret"])]
    fn test_missing_columns(#[case] table: &str, #[case] expected: Vec<&'static str>) {
        let result = parse_credentials(table.as_bytes());

        assert_matches!(result, Err(IngestError::MissingColumns(missing)) if missing == expected);
    }

    #[test]
    fn test_header_only_is_zero_records() {
        let credentials = parse_credentials(HEADER.as_bytes()).unwrap().credentials;

        assert!(credentials.is_empty());
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let table = format!("{HEADER}\nK1,S1,T1");

        assert_matches!(parse_credentials(table.as_bytes()), Err(IngestError::Parse(_)));
    }

    #[test]
    fn test_empty_cell_skips_only_that_row() {
        let table = format!("{HEADER}\nK1,S1,T1,AS1\nK2,S2,T2,AS2\nK3,,T3,AS3\nK4,S4,T4,");

        let table = parse_credentials(table.as_bytes()).unwrap();

        assert_eq!(
            table.credentials,
            vec![
                Credential::new("K1", "S1", "T1", "AS1"),
                Credential::new("K2", "S2", "T2", "AS2"),
            ]
        );
        assert_eq!(
            table.unusable,
            vec![
                UnusableRow {
                    row: 3,
                    column: "api_secret"
                },
                UnusableRow {
                    row: 4,
                    column: "access_secret"
                },
            ]
        );
    }

    #[test]
    fn test_ingest_warns_about_skipped_rows() {
        let labels = Language::En.labels();
        let source = CredentialSource::Text(format!("{HEADER}\nK1,S1,T1,AS1\nK2,S2,T2,AS2\nK3,,T3,AS3"));

        let ingestion = ingest(&source, labels);

        assert_eq!(ingestion.credentials.len(), 2);
        assert_eq!(
            ingestion.notices,
            vec![
                Notice::success("✅ 2 loaded from text."),
                Notice::warning("⚠️ row 3: column `api_secret` is empty"),
            ]
        );
    }

    #[test]
    fn test_ingest_text_success_notice() {
        let labels = Language::En.labels();
        let source = CredentialSource::Text(format!("\n  {HEADER}\nK1,S1,T1,AS1\n\n"));

        let ingestion = ingest(&source, labels);

        assert_eq!(ingestion.credentials.len(), 1);
        assert_eq!(ingestion.notices, vec![Notice::success("✅ 1 loaded from text.")]);
    }

    #[test]
    fn test_ingest_file_success_notice() {
        let labels = Language::En.labels();
        let source = CredentialSource::File(format!("{HEADER}\nK1,S1,T1,AS1\nK2,S2,T2,AS2\n").into_bytes());

        let ingestion = ingest(&source, labels);

        assert_eq!(ingestion.credentials.len(), 2);
        assert_eq!(ingestion.notices, vec![Notice::success("✅ 2 loaded.")]);
    }

    #[test]
    fn test_ingest_missing_columns_shows_instructions() {
        let labels = Language::Pt.labels();
        let source = CredentialSource::Text("api_key,api_secret\nK1,S1".to_string());

        let ingestion = ingest(&source, labels);

        assert!(ingestion.credentials.is_empty());
        assert_eq!(ingestion.notices, vec![Notice::error(labels.upload_instructions)]);
    }

    #[test]
    fn test_ingest_parse_error_is_verbatim() {
        let labels = Language::En.labels();
        let source = CredentialSource::Text(format!("{HEADER}\nK1,S1"));

        let ingestion = ingest(&source, labels);

        assert!(ingestion.credentials.is_empty());
        assert_matches!(
            ingestion.notices.as_slice(),
            [Notice { level: NoticeLevel::Error, text }] if text.contains("fields")
        );
    }

    #[test]
    fn test_invalid_utf8_file_is_parse_error() {
        let labels = Language::En.labels();
        let mut bytes = format!("{HEADER}\n").into_bytes();
        bytes.extend_from_slice(&[0xff, 0xfe, b',', b'S', b',', b'T', b',', b'A']);

        let ingestion = ingest(&CredentialSource::File(bytes), labels);

        assert!(ingestion.credentials.is_empty());
        assert_matches!(
            ingestion.notices.as_slice(),
            [Notice {
                level: NoticeLevel::Error,
                ..
            }]
        );
    }

    #[rstest]
    #[case(Some(b"f".to_vec()), Some("t".to_string()), Some(CredentialSource::Text("t".to_string())), true)]
    #[case(Some(b"f".to_vec()), Some("   ".to_string()), Some(CredentialSource::File(b"f".to_vec())), false)]
    #[case(None, Some("t".to_string()), Some(CredentialSource::Text("t".to_string())), false)]
    #[case(Some(b"f".to_vec()), None, Some(CredentialSource::File(b"f".to_vec())), false)]
    #[case(None, None, None, false)]
    fn test_source_precedence(
        #[case] file: Option<Vec<u8>>,
        #[case] text: Option<String>,
        #[case] expected: Option<CredentialSource>,
        #[case] file_ignored: bool,
    ) {
        assert_eq!(CredentialSource::choose(file, text), (expected, file_ignored));
    }

    #[test]
    fn test_debug_and_mask_hide_secrets() {
        let credential = Credential::new("consumerKEY1234", "S3CRET", "TOKEN", "ASECRET");

        assert_eq!(credential.masked_key(), "***1234");

        let debug = format!("{credential:?}");
        assert!(!debug.contains("S3CRET"));
        assert!(!debug.contains("consumerKEY"));
    }
}
