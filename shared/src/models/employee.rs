//! Employee Model

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Office location of an employee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Location {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            state: Some(state.into()),
        }
    }
}

/// Every field of an employee record except its id
///
/// All fields are optional: an API replace stores exactly what was sent, so a
/// field missing from the payload is missing from the document.
///
/// Decoding never fails. A known key whose value has another type (a numeric
/// `phone`, a string `isAdmin`) is kept in `extra` like an unknown key, and
/// everything in `extra` is written back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct EmployeeProfile {
    pub name: Option<String>,
    pub designation: Option<String>,
    /// Login username
    pub email: Option<String>,
    /// Stored as-is, compared by string equality at login
    pub password: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    /// ISO date (`YYYY-MM-DD`)
    pub joining_date: Option<String>,
    pub location: Option<Location>,
    pub is_admin: Option<bool>,
    pub registration_completed: Option<bool>,
    pub extra: Map<String, Value>,
}

/// Take `key` out of `map` if its value decodes as `T`, otherwise leave it
fn take<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<T> {
    let decoded = T::deserialize(map.get(key)?).ok()?;
    map.remove(key);
    Some(decoded)
}

fn put<T: Serialize>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value.and_then(|v| serde_json::to_value(v).ok()) {
        map.insert(key.to_string(), v);
    }
}

impl From<Map<String, Value>> for EmployeeProfile {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            name: take(&mut map, "name"),
            designation: take(&mut map, "designation"),
            email: take(&mut map, "email"),
            password: take(&mut map, "password"),
            phone: take(&mut map, "phone"),
            department: take(&mut map, "department"),
            joining_date: take(&mut map, "joiningDate"),
            location: take(&mut map, "location"),
            is_admin: take(&mut map, "isAdmin"),
            registration_completed: take(&mut map, "registrationCompleted"),
            extra: map,
        }
    }
}

impl From<EmployeeProfile> for Map<String, Value> {
    fn from(profile: EmployeeProfile) -> Self {
        let mut map = profile.extra;
        put(&mut map, "name", profile.name);
        put(&mut map, "designation", profile.designation);
        put(&mut map, "email", profile.email);
        put(&mut map, "password", profile.password);
        put(&mut map, "phone", profile.phone);
        put(&mut map, "department", profile.department);
        put(&mut map, "joiningDate", profile.joining_date);
        put(&mut map, "location", profile.location);
        put(&mut map, "isAdmin", profile.is_admin);
        put(&mut map, "registrationCompleted", profile.registration_completed);
        map
    }
}

impl EmployeeProfile {
    /// Drop any client-supplied `id`; ids are assigned by the directory
    pub fn without_id(mut self) -> Self {
        self.extra.remove("id");
        self
    }
}

/// Employee record as persisted in the directory document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
}

impl Employee {
    pub fn new(id: u32, profile: EmployeeProfile) -> Self {
        Self { id, profile }
    }

    /// Read one entry of the `employees` array
    ///
    /// Anything that is not an object with a `u32` id is handed back
    /// unchanged.
    pub fn from_record(record: Value) -> Result<Self, Value> {
        let Value::Object(mut map) = record else {
            return Err(record);
        };
        let id = map
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok());
        match id {
            Some(id) => {
                map.remove("id");
                Ok(Self::new(id, EmployeeProfile::from(map)))
            }
            None => Err(Value::Object(map)),
        }
    }

    pub fn name(&self) -> &str {
        self.profile.name.as_deref().unwrap_or_default()
    }

    pub fn email(&self) -> Option<&str> {
        self.profile.email.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.profile.password.as_deref()
    }

    /// Absent flag reads as false
    pub fn is_admin(&self) -> bool {
        self.profile.is_admin.unwrap_or(false)
    }

    /// Absent flag reads as false, so such accounts cannot log in
    pub fn registration_completed(&self) -> bool {
        self.profile.registration_completed.unwrap_or(false)
    }

    /// Parsed joining date
    ///
    /// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
    /// Anything else yields `None`.
    pub fn joining_date(&self) -> Option<NaiveDate> {
        let raw = self.profile.joining_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    /// `"City, State"`, skipping empty parts
    pub fn location_label(&self) -> String {
        let Some(location) = &self.profile.location else {
            return String::new();
        };
        [location.city.as_deref(), location.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
