//! User domain entity, as seen by the rental workflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// National tax/identity number
    pub cpf: String,
    pub birth_date: NaiveDate,
}

impl User {
    /// Display name ("first last")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on the given date
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age::age_on(self.birth_date, today)
    }

    /// Check if the user is too young to rent on the given date
    pub fn is_under_age_on(&self, today: NaiveDate) -> bool {
        age::is_under_age(self.birth_date, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(birth_date: NaiveDate) -> User {
        User {
            id: 1,
            first_name: "Josefino".to_string(),
            last_name: "Silva".to_string(),
            email: "josefino@teste.com".to_string(),
            cpf: "9999999999".to_string(),
            birth_date,
        }
    }

    #[test]
    fn test_full_name() {
        let u = user(NaiveDate::from_ymd_opt(2000, 11, 4).unwrap());
        assert_eq!(u.full_name(), "Josefino Silva");
    }

    #[test]
    fn test_is_under_age_on() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(user(NaiveDate::from_ymd_opt(2006, 11, 4).unwrap()).is_under_age_on(today));
        assert!(!user(NaiveDate::from_ymd_opt(2000, 11, 4).unwrap()).is_under_age_on(today));
    }

    #[test]
    fn test_serializes_camel_case() {
        let u = user(NaiveDate::from_ymd_opt(2000, 11, 4).unwrap());
        let json = serde_json::to_value(&u).unwrap();

        assert_eq!(json["firstName"], "Josefino");
        assert_eq!(json["lastName"], "Silva");
        assert_eq!(json["birthDate"], "2000-11-04");
    }
}
