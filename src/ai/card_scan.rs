//! Business-card scanning through a local Ollama vision model. The model
//! reads a card photo and answers with JSON, which becomes a `ScannedCard`
//! used to pre-fill a new contact.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ContactsError, ContactsResult};
use crate::model::{Contact, PhoneType};
use crate::ops::{contact_ops, detail_ops};

const SYSTEM_PROMPT: &str = r#"You read business cards and extract contact details.
Respond with JSON only, no other text.
JSON schema: { "firstName": "...", "lastName": "...", "emails": ["..."], "phones": [{ "number": "...", "type": "Mobile|Telephone" }], "organization": null, "designation": null, "department": null, "address": null, "websites": ["..."], "socialLinks": ["..."] }
Rules:
- Copy values exactly as printed. Do not invent values that are not on the card.
- Use null for fields that are not present and [] for empty lists.
- A phone marked mobile or cell is "Mobile"; office, tel, or landline numbers are "Telephone".
- websites are company or personal sites; socialLinks are profile URLs such as LinkedIn or X."#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedPhone {
    pub number: String,
    pub phone_type: PhoneType,
}

/// Fields read off a business card. Nothing here is persisted until
/// `save` is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScannedCard {
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    pub phones: Vec<ScannedPhone>,
    pub organization: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub address: Option<String>,
    pub websites: Vec<String>,
    pub social_links: Vec<String>,
}

/// Check that Ollama is running and reachable.
pub fn check_ollama(config: &Config) -> ContactsResult<()> {
    ureq::get(&config.ollama_url)
        .timeout(Duration::from_secs(3))
        .call()
        .map_err(|_| {
            ContactsError::Scan(format!(
                "Cannot connect to Ollama at {}. Is it running? Start it with `ollama serve`.",
                config.ollama_url
            ))
        })?;
    Ok(())
}

/// Send a card image (PNG or JPEG bytes) to the vision model and parse its
/// answer.
pub fn scan_card(config: &Config, image: &[u8]) -> ContactsResult<ScannedCard> {
    if image.is_empty() {
        return Err(ContactsError::Scan("Image is empty".into()));
    }

    let request_body = serde_json::json!({
        "model": config.card_model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            {
                "role": "user",
                "content": "Extract the contact details from this business card.",
                "images": [BASE64.encode(image)]
            }
        ],
        "format": "json",
        "stream": false
    });

    let api_url = format!("{}/api/chat", config.ollama_url);
    debug!(model = %config.card_model, bytes = image.len(), "scanning business card");

    let response = ureq::post(&api_url)
        .set("Content-Type", "application/json")
        .timeout(Duration::from_secs(120))
        .send_json(request_body)
        .map_err(|e| match e {
            ureq::Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                let snippet: String = body.chars().take(200).collect();
                ContactsError::Scan(format!("Ollama request failed (HTTP {}): {}", code, snippet))
            }
            ureq::Error::Transport(t) => {
                ContactsError::Scan(format!("Could not connect to Ollama: {}", t))
            }
        })?;

    let json: Value = response.into_json()?;
    let content = json
        .pointer("/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| ContactsError::Scan("No content in Ollama response".into()))?;

    parse_card_json(content)
}

/// Parse the model's JSON answer. Blank strings are dropped, unknown phone
/// types fall back to Mobile, and a card without any name is rejected.
pub fn parse_card_json(content: &str) -> ContactsResult<ScannedCard> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ContactsError::Scan(format!("Failed to parse model response: {}", e)))?;

    let mut card = ScannedCard {
        first_name: text(&json, "firstName").unwrap_or_default(),
        last_name: text(&json, "lastName").unwrap_or_default(),
        emails: text_list(&json, "emails"),
        phones: phones(&json),
        organization: text(&json, "organization"),
        designation: text(&json, "designation"),
        department: text(&json, "department"),
        address: text(&json, "address"),
        websites: text_list(&json, "websites"),
        social_links: text_list(&json, "socialLinks"),
    };

    // Some models answer with a single "name" field.
    if card.first_name.is_empty() && card.last_name.is_empty() {
        if let Some(full) = text(&json, "name") {
            let mut parts = full.splitn(2, char::is_whitespace);
            card.first_name = parts.next().unwrap_or_default().to_string();
            card.last_name = parts.next().unwrap_or_default().trim().to_string();
        }
    }

    if card.first_name.is_empty() && card.last_name.is_empty() {
        return Err(ContactsError::Scan("Model did not extract a name".into()));
    }
    Ok(card)
}

impl ScannedCard {
    /// Create a contact from the card. Details the ops layer rejects (a
    /// malformed email the model misread, say) are skipped with a warning;
    /// the contact itself must be valid.
    pub fn save(&self, conn: &Connection) -> ContactsResult<Contact> {
        let first_name = if self.first_name.is_empty() {
            &self.last_name
        } else {
            &self.first_name
        };
        let last_name = if self.first_name.is_empty() {
            None
        } else {
            Some(self.last_name.as_str())
        };

        let tx = conn.unchecked_transaction()?;
        let contact = contact_ops::add_contact(&tx, first_name, last_name, None, None, None)?;

        for email in &self.emails {
            skip_invalid("email", detail_ops::add_email(&tx, contact.id, email))?;
        }
        for phone in &self.phones {
            skip_invalid(
                "phone",
                detail_ops::add_phone(&tx, contact.id, &phone.number, phone.phone_type),
            )?;
        }
        if let Some(org) = &self.organization {
            skip_invalid(
                "organization",
                detail_ops::add_organization(
                    &tx,
                    contact.id,
                    org,
                    self.designation.as_deref(),
                    None,
                    self.department.as_deref(),
                    self.address.as_deref(),
                ),
            )?;
        }
        for url in &self.websites {
            skip_invalid("website", detail_ops::add_url(&tx, contact.id, url))?;
        }
        for link in &self.social_links {
            skip_invalid("social link", detail_ops::add_social_link(&tx, contact.id, link))?;
        }

        tx.commit()?;
        Ok(contact)
    }
}

fn skip_invalid<T>(what: &str, result: ContactsResult<T>) -> ContactsResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e @ (ContactsError::BlankField { .. } | ContactsError::InvalidFormat { .. })) => {
            warn!(field = what, error = %e, "skipping scanned value");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn text(json: &Value, key: &str) -> Option<String> {
    json.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn text_list(json: &Value, key: &str) -> Vec<String> {
    match json.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn phones(json: &Value) -> Vec<ScannedPhone> {
    let Some(items) = json.get("phones").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let (number, label) = match item {
                Value::String(s) => (s.trim().to_string(), None),
                Value::Object(_) => (
                    text(item, "number").unwrap_or_default(),
                    text(item, "type"),
                ),
                _ => return None,
            };
            if number.is_empty() {
                return None;
            }
            let phone_type = label
                .as_deref()
                .and_then(PhoneType::from_label)
                .unwrap_or(PhoneType::Mobile);
            Some(ScannedPhone { number, phone_type })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::queries::contact_queries;

    #[test]
    fn parses_full_card() {
        let card = parse_card_json(
            r#"{
                "firstName": "Jane", "lastName": "Doe",
                "emails": ["jane@x.com", " "],
                "phones": [{"number": "555-1234", "type": "Mobile"}, {"number": "555-0000", "type": "office"}],
                "organization": "Acme", "designation": "Eng Lead", "department": null,
                "address": "1 Main St", "websites": ["https://acme.com"], "socialLinks": []
            }"#,
        )
        .unwrap();

        assert_eq!(card.first_name, "Jane");
        assert_eq!(card.emails, vec!["jane@x.com"]);
        assert_eq!(card.phones[1].phone_type, PhoneType::Telephone);
        assert_eq!(card.organization.as_deref(), Some("Acme"));
        assert_eq!(card.department, None);
        assert!(card.social_links.is_empty());
    }

    #[test]
    fn unknown_phone_type_defaults_to_mobile() {
        let card = parse_card_json(r#"{"firstName":"Jo","phones":[{"number":"1","type":"fax"},"2"]}"#).unwrap();
        assert_eq!(card.phones.len(), 2);
        assert!(card.phones.iter().all(|p| p.phone_type == PhoneType::Mobile));
    }

    #[test]
    fn single_name_field_is_split() {
        let card = parse_card_json(r#"{"name":"Jane van Doe"}"#).unwrap();
        assert_eq!(card.first_name, "Jane");
        assert_eq!(card.last_name, "van Doe");
    }

    #[test]
    fn card_without_name_is_rejected() {
        assert!(parse_card_json(r#"{"emails":["a@b.com"]}"#).is_err());
        assert!(parse_card_json("not json").is_err());
    }

    #[test]
    fn save_skips_values_that_fail_validation() {
        let conn = schema::test_connection();
        let card = ScannedCard {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            emails: vec!["jane@x.com".into(), "jane at x".into()],
            organization: Some("Acme".into()),
            designation: Some("Eng Lead".into()),
            websites: vec!["acme.com".into()],
            ..ScannedCard::default()
        };

        let contact = card.save(&conn).unwrap();
        let details = contact_queries::details_for(&conn, contact.id).unwrap().unwrap();
        assert_eq!(details.emails.len(), 1);
        assert_eq!(details.organizations[0].designation.as_deref(), Some("Eng Lead"));
        assert!(details.urls.is_empty());
    }
}
