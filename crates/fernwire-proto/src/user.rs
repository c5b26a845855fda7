//! User records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{JsonMap, TYPE_FIELD, UserId};

/// User as last reported by the backend.
///
/// `status` is kept as the raw wire object; [`UserStatus::from_wire`]
/// projects it into a typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Public username, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Phone number, empty when hidden.
    #[serde(default)]
    pub phone_number: String,
    /// Raw `userStatus*` object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Every other field, as received.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl User {
    /// First and last name joined with a space, trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Projected online status of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserStatus {
    /// No status reported.
    Empty,
    /// Online until `expires` (unix seconds).
    Online {
        /// Unix time when the online status expires.
        expires: i64,
    },
    /// Offline since `was_online` (unix seconds).
    Offline {
        /// Unix time the user was last seen.
        was_online: i64,
    },
    /// Seen recently.
    Recently,
    /// Seen within the last week.
    LastWeek,
    /// Seen within the last month.
    LastMonth,
    /// Status type this crate does not know.
    Unknown(String),
}

impl UserStatus {
    /// Project a raw `userStatus*` object.
    pub fn from_wire(status: Option<&Value>) -> Self {
        let Some(status) = status else {
            return Self::Empty;
        };
        let field = |name: &str| status.get(name).and_then(Value::as_i64).unwrap_or_default();

        match status.get(TYPE_FIELD).and_then(Value::as_str) {
            None | Some("userStatusEmpty") => Self::Empty,
            Some("userStatusOnline") => Self::Online { expires: field("expires") },
            Some("userStatusOffline") => Self::Offline { was_online: field("was_online") },
            Some("userStatusRecently") => Self::Recently,
            Some("userStatusLastWeek") => Self::LastWeek,
            Some("userStatusLastMonth") => Self::LastMonth,
            Some(other) => Self::Unknown(other.to_owned()),
        }
    }

    /// Whether the user is currently marked online.
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online { .. })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_fields_round_trip() {
        let wire = json!({
            "@type": "user",
            "id": 1001,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone_number": "15550100",
            "status": {"@type": "userStatusOnline", "expires": 1_700_000_000},
            "is_premium": true,
            "profile_photo": {"id": "5"}
        });

        let user: User = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(user.id, UserId::from(1001));
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert_eq!(user.extra.get("is_premium"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&user).unwrap(), wire);
    }

    #[test]
    fn status_projection() {
        let online = json!({"@type": "userStatusOnline", "expires": 10});
        let offline = json!({"@type": "userStatusOffline", "was_online": 7});
        let odd = json!({"@type": "userStatusSomethingNew"});

        assert_eq!(UserStatus::from_wire(Some(&online)), UserStatus::Online { expires: 10 });
        assert_eq!(UserStatus::from_wire(Some(&offline)), UserStatus::Offline { was_online: 7 });
        assert_eq!(UserStatus::from_wire(None), UserStatus::Empty);
        assert_eq!(
            UserStatus::from_wire(Some(&odd)),
            UserStatus::Unknown("userStatusSomethingNew".into())
        );
        assert!(UserStatus::from_wire(Some(&online)).is_online());
    }
}
