//! Directory document - the single persisted aggregate

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use super::employee::{Employee, EmployeeProfile};

/// Document-level failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("directory document must be a JSON object")]
    NotAnObject,

    #[error("`employees` must be an array")]
    EmployeesNotAnArray,

    #[error("no employee id left after {0}")]
    IdsExhausted(u32),
}

/// One entry of the `employees` array as it is written out
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record<'a> {
    Employee(&'a Employee),
    Unreadable(&'a Value),
}

/// The whole persisted state: `{ "employees": [...] }`
///
/// Lookups are linear scans over `employees`; there are no secondary indexes.
/// Array entries without a usable id sit in `unreadable` and other top-level
/// keys in `extra`. Both are written back untouched after the employees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    pub employees: Vec<Employee>,
    pub unreadable: Vec<Value>,
    pub extra: Map<String, Value>,
}

impl TryFrom<Value> for Directory {
    type Error = DirectoryError;

    fn try_from(document: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut extra) = document else {
            return Err(DirectoryError::NotAnObject);
        };
        let records = match extra.remove("employees") {
            None => Vec::new(),
            Some(Value::Array(records)) => records,
            Some(_) => return Err(DirectoryError::EmployeesNotAnArray),
        };

        let mut directory = Directory {
            extra,
            ..Default::default()
        };
        for record in records {
            match Employee::from_record(record) {
                Ok(employee) => directory.employees.push(employee),
                Err(raw) => directory.unreadable.push(raw),
            }
        }
        Ok(directory)
    }
}

impl<'de> Deserialize<'de> for Directory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        Directory::try_from(document).map_err(D::Error::custom)
    }
}

impl Serialize for Directory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.extra.len() + 1))?;
        map.serialize_entry("employees", &self.records())?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Directory {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Every array entry in write order
    pub fn records(&self) -> Vec<Record<'_>> {
        self.employees
            .iter()
            .map(Record::Employee)
            .chain(self.unreadable.iter().map(Record::Unreadable))
            .collect()
    }

    /// Next sequential id: `max(existing) + 1`, or 1 when empty
    pub fn next_id(&self) -> Result<u32, DirectoryError> {
        match self.employees.iter().map(|e| e.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(DirectoryError::IdsExhausted(max)),
        }
    }

    pub fn find(&self, id: u32) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// First record whose email equals `email` exactly
    pub fn find_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.email() == Some(email))
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.employees.iter().position(|e| e.id == id)
    }

    /// Append a record under the next id and return it
    pub fn insert(&mut self, profile: EmployeeProfile) -> Result<&Employee, DirectoryError> {
        let id = self.next_id()?;
        let index = self.employees.len();
        self.employees.push(Employee::new(id, profile));
        Ok(&self.employees[index])
    }

    /// Replace the record with `id` wholesale, keeping its position
    ///
    /// Returns `None` when no such record exists.
    pub fn replace(&mut self, id: u32, profile: EmployeeProfile) -> Option<&Employee> {
        let index = self.position(id)?;
        self.employees[index] = Employee::new(id, profile);
        Some(&self.employees[index])
    }

    /// Remove every record with `id`; returns true if something was removed
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        self.employees.len() < before
    }

    /// Up to `limit` records with the most recent joining date first
    ///
    /// The sort is stable, so records with equal dates keep document order.
    /// Records without a parseable date come after all dated ones.
    pub fn recent(&self, limit: usize) -> Vec<&Employee> {
        let mut sorted: Vec<&Employee> = self.employees.iter().collect();
        sorted.sort_by(|a, b| b.joining_date().cmp(&a.joining_date()));
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str, joined: &str) -> EmployeeProfile {
        EmployeeProfile {
            name: Some(name.into()),
            email: Some(email.into()),
            joining_date: Some(joined.into()),
            ..Default::default()
        }
    }

    fn directory_with(ids: &[u32]) -> Directory {
        Directory::new(
            ids.iter()
                .map(|id| Employee::new(*id, EmployeeProfile::default()))
                .collect(),
        )
    }

    #[test]
    fn test_next_id_empty_is_one() {
        assert_eq!(Directory::default().next_id(), Ok(1));
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        assert_eq!(directory_with(&[1, 2, 3]).next_id(), Ok(4));
        assert_eq!(directory_with(&[7, 2]).next_id(), Ok(8));
        assert_eq!(directory_with(&[5]).next_id(), Ok(6));
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut directory = Directory::default();
        assert_eq!(directory.insert(EmployeeProfile::default()).unwrap().id, 1);
        assert_eq!(directory.insert(EmployeeProfile::default()).unwrap().id, 2);
        directory.remove(1);
        assert_eq!(directory.insert(EmployeeProfile::default()).unwrap().id, 3);
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_find_by_email_is_exact() {
        let mut directory = Directory::default();
        directory.insert(profile("A", "a@x.com", "2024-01-01")).unwrap();
        assert!(directory.find_by_email("a@x.com").is_some());
        assert!(directory.find_by_email("A@X.COM").is_none());
        assert!(directory.find_by_email("").is_none());
    }

    #[test]
    fn test_replace_keeps_position_and_id() {
        let mut directory = Directory::default();
        directory.insert(profile("A", "a@x.com", "2024-01-01")).unwrap();
        directory.insert(profile("B", "b@x.com", "2024-01-02")).unwrap();

        let replaced = directory
            .replace(1, profile("A2", "a2@x.com", "2024-02-01"))
            .unwrap();
        assert_eq!(replaced.id, 1);
        assert_eq!(directory.employees[0].name(), "A2");
        assert!(directory.replace(42, EmployeeProfile::default()).is_none());
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_remove_reports_absence() {
        let mut directory = directory_with(&[1, 2]);
        assert!(directory.remove(2));
        assert!(!directory.remove(2));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_recent_sorted_desc_and_limited() {
        let mut directory = Directory::default();
        directory.insert(profile("Old", "o@x.com", "2020-01-01")).unwrap();
        directory.insert(profile("New", "n@x.com", "2025-06-01")).unwrap();
        directory.insert(profile("Mid", "m@x.com", "2023-03-15")).unwrap();
        directory.insert(profile("Newer", "nr@x.com", "2025-07-01")).unwrap();
        directory.insert(profile("Mid2", "m2@x.com", "2022-03-15")).unwrap();

        let names: Vec<&str> = directory.recent(4).iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Newer", "New", "Mid", "Mid2"]);
    }

    #[test]
    fn test_recent_is_stable_for_ties() {
        let mut directory = Directory::default();
        directory.insert(profile("First", "1@x.com", "2024-05-05")).unwrap();
        directory.insert(profile("Second", "2@x.com", "2024-05-05")).unwrap();
        directory.insert(profile("Third", "3@x.com", "2024-05-05")).unwrap();

        let names: Vec<&str> = directory.recent(4).iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_recent_puts_undated_last() {
        let mut directory = Directory::default();
        directory.insert(profile("Undated", "u@x.com", "someday")).unwrap();
        directory.insert(profile("Dated", "d@x.com", "2019-01-01")).unwrap();

        let names: Vec<&str> = directory.recent(4).iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Dated", "Undated"]);
    }

    #[test]
    fn test_recent_len_is_min_of_limit_and_total() {
        assert_eq!(directory_with(&[1, 2]).recent(4).len(), 2);
        assert_eq!(directory_with(&[1, 2, 3, 4, 5, 6]).recent(4).len(), 4);
        assert!(Directory::default().recent(4).is_empty());
    }

    #[test]
    fn test_document_shape() {
        let directory: Directory = serde_json::from_str(r#"{"employees":[{"id":1}]}"#).unwrap();
        assert_eq!(directory.len(), 1);

        let empty: Directory = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
        assert_eq!(serde_json::to_string(&empty).unwrap(), r#"{"employees":[]}"#);
    }

    #[test]
    fn test_next_id_refuses_to_wrap() {
        let mut directory = directory_with(&[3, u32::MAX]);
        assert_eq!(directory.next_id(), Err(DirectoryError::IdsExhausted(u32::MAX)));
        assert!(directory.insert(EmployeeProfile::default()).is_err());
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_off_schema_entries_survive_a_rewrite() {
        let document = serde_json::json!({
            "employees": [
                {"id": 1, "name": "A", "phone": 5551234, "isAdmin": "true"},
                {"id": "2", "name": "String id"},
                42,
                {"id": 3, "name": "C"}
            ],
            "version": 2
        });
        let mut directory = Directory::try_from(document).unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.unreadable.len(), 2);
        assert_eq!(directory.next_id(), Ok(4));

        directory.insert(profile("D", "d@x.com", "2024-01-01")).unwrap();
        let written = serde_json::to_value(&directory).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "employees": [
                    {"id": 1, "name": "A", "phone": 5551234, "isAdmin": "true"},
                    {"id": 3, "name": "C"},
                    {"id": 4, "name": "D", "email": "d@x.com", "joiningDate": "2024-01-01"},
                    {"id": "2", "name": "String id"},
                    42
                ],
                "version": 2
            })
        );
    }

    #[test]
    fn test_document_of_wrong_shape_is_an_error() {
        assert_eq!(
            Directory::try_from(serde_json::json!([1, 2])),
            Err(DirectoryError::NotAnObject)
        );
        assert_eq!(
            Directory::try_from(serde_json::json!({"employees": {"id": 1}})),
            Err(DirectoryError::EmployeesNotAnArray)
        );
        assert!(serde_json::from_str::<Directory>(r#"{"employees": "none"}"#).is_err());
    }
}
