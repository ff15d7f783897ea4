use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, EnumString};
use validator::Validate;

/// Form fields, addressed by their wire names.
#[derive(EnumString, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    #[strum(serialize = "user_name")]
    FullName,
    #[strum(serialize = "user_email")]
    Email,
    #[strum(serialize = "user_phone")]
    Phone,
    #[strum(serialize = "user_company")]
    Company,
    #[strum(serialize = "message")]
    Message,
}

/// A single contact inquiry, as typed by the visitor and as sent on the wire.
#[derive(Validate, Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct ContactSubmission {
    #[serde(rename = "user_name", default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub full_name: String,

    #[serde(rename = "user_email", default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub email: String,

    #[serde(rename = "user_phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "user_company", default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();

        match field {
            Field::FullName => self.full_name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = Some(value),
            Field::Company => self.company = Some(value),
            Field::Message => self.message = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => self.phone.as_deref().unwrap_or_default(),
            Field::Company => self.company.as_deref().unwrap_or_default(),
            Field::Message => &self.message,
        }
    }

    /// Phone number, if one was given. Blank input counts as absent.
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    /// Company name, if one was given. Blank input counts as absent.
    pub fn company(&self) -> Option<&str> {
        non_blank(self.company.as_deref())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// `null` is left for the required-field check rather than failing the body.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Body returned by the relay for every outcome.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn sent(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Email sent successfully".to_owned(),
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            message_id: None,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            message_id: None,
            error: Some(code.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn field_parses_wire_names() {
        assert_eq!(Field::from_str("user_name"), Ok(Field::FullName));
        assert_eq!(Field::from_str("user_company"), Ok(Field::Company));
        assert_eq!(Field::from_str("message"), Ok(Field::Message));
        assert!(Field::from_str("subject").is_err());
        assert_eq!(Field::Phone.as_ref(), "user_phone");
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let submission = ContactSubmission {
            phone: Some("   ".to_owned()),
            company: Some(" Acme ".to_owned()),
            ..Default::default()
        };

        assert_eq!(submission.phone(), None);
        assert_eq!(submission.company(), Some("Acme"));
    }

    #[test]
    fn wire_names_are_used_on_serialize() {
        let submission = ContactSubmission {
            full_name: "Jane Doe".to_owned(),
            email: "jane@x.com".to_owned(),
            phone: None,
            company: Some("Acme".to_owned()),
            message: "Hello".to_owned(),
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "user_name": "Jane Doe",
                "user_email": "jane@x.com",
                "user_company": "Acme",
                "message": "Hello"
            })
        );
    }

    #[test]
    fn missing_wire_fields_default_to_empty() {
        let submission: ContactSubmission =
            serde_json::from_str(r#"{"user_email":"jane@x.com"}"#).unwrap();

        assert!(submission.full_name.is_empty());
        assert!(submission.message.is_empty());
        assert_eq!(submission.phone, None);
    }

    #[test]
    fn null_required_fields_deserialize_as_empty() {
        let submission: ContactSubmission = serde_json::from_str(
            r#"{"user_name":null,"user_email":"jane@x.com","user_phone":null,"message":null}"#,
        )
        .unwrap();

        assert!(submission.full_name.is_empty());
        assert!(submission.message.is_empty());
        assert_eq!(submission.phone, None);
        assert!(submission.check_required().is_err());
    }
}
