use serde::{Deserialize, Deserializer, Serialize};

/// Registration form contents as the user is filling them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub emp_id: String,
    /// Filled from the employee lookup, never typed.
    pub emp_name: String,
    /// Filled from the employee lookup, never typed.
    pub company_name: String,
    pub phone_number: String,
    pub participants: String,
    pub field_error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Normal,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// Identifier that switches the form into admin login.
    pub admin_token: String,
    pub participants_max_len: usize,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            admin_token: "admin".to_string(),
            participants_max_len: 3,
        }
    }
}

/// What the confirmation screen shows after a register or lookup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResult {
    pub registration_number: String,
    pub already_registered: bool,
    pub emp_id: String,
    pub emp_name: String,
    pub company_name: String,
    pub phone_number: String,
    pub participants: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(rename = "totalParticipants", deserialize_with = "count")]
    pub total_participants: u64,
    #[serde(rename = "totalRegistered", deserialize_with = "count")]
    pub total_registered: u64,
    #[serde(rename = "stats", default)]
    pub per_company: Vec<CompanyStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyStats {
    pub company: String,
    #[serde(deserialize_with = "count")]
    pub registered: u64,
    #[serde(deserialize_with = "count")]
    pub participants: u64,
}

/// Outcome of `/check-employee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeLookup {
    Available {
        emp_name: String,
        company_name: String,
    },
    AlreadyRegistered {
        registration_number: String,
        emp_name: String,
        company_name: String,
        phone_number: String,
        participants: String,
    },
}

/// Outcome of `/register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Created { registration_number: String },
    AlreadyRegistered { registration_number: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub emp_id: String,
    pub phone_number: String,
    pub participants: String,
}

/// How a failed call looks to a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The server answered with an error; `message` is its `error` field.
    Rejected { message: Option<String> },
    Unreachable,
}

impl Failure {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Server message when there is one, `default` otherwise.
    pub fn message_or(&self, default: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
            } if !message.is_empty() => message.clone(),
            _ => default.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

/// Database-backed fields (`rnd`, `phoneNumber`, ...) arrive as either
/// strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    // SUM over no rows comes back as null.
    let Some(value) = Option::<Scalar>::deserialize(deserializer)? else {
        return Ok(0);
    };
    match value {
        Scalar::Int(i) if i >= 0 => Ok(i as u64),
        Scalar::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
        Scalar::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "invalid count: {}",
            other.into_string()
        ))),
    }
}
