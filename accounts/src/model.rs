use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::account_storage::AccountStorage;
use crate::error::{AccountError, Result};
use crate::storage_model::account;

pub type AccountId = i32;

/// The five client-supplied fields of an account, in interchange form.
///
/// Unknown keys (including a fixture's `id`) are ignored on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "today", with = "iso_date")]
    pub date_joined: NaiveDate,
}

impl Default for AccountData {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            disabled: false,
            date_joined: today(),
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `date_joined` is exchanged as a zero-padded `YYYY-MM-DD` string only, so
/// that a parsed value always formats back to the same text.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn format(date: &NaiveDate) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&text, FORMAT)
            .ok()
            .filter(|date| format(date) == text)
            .ok_or_else(|| D::Error::custom(format!("invalid date {:?}, expected YYYY-MM-DD", text)))
    }
}

// Present keys must carry a value; `null` is a type error, not "leave unchanged".
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn present_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    iso_date::deserialize(deserializer).map(Some)
}

// Partial view used by `from_dict`: only keys present in the mapping are applied.
#[derive(Debug, Default, Deserialize)]
struct AccountPatch {
    #[serde(default, deserialize_with = "present")]
    name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    phone_number: Option<String>,
    #[serde(default, deserialize_with = "present")]
    disabled: Option<bool>,
    #[serde(default, deserialize_with = "present_date")]
    date_joined: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Assigned by the store on `create`; `None` while transient.
    pub id: Option<AccountId>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub disabled: bool,
    pub date_joined: NaiveDate,
}

impl Default for Account {
    fn default() -> Self {
        Self::from_data(AccountData::default())
    }
}

impl From<AccountData> for Account {
    fn from(data: AccountData) -> Self {
        Self::from_data(data)
    }
}

impl From<account::Model> for Account {
    fn from(model: account::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            phone_number: model.phone_number,
            disabled: model.disabled,
            date_joined: model.date_joined,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Account '{}'>", self.name)
    }
}

impl Account {
    /// Build a transient account from a complete data record.
    pub fn from_data(data: AccountData) -> Self {
        Self {
            id: None,
            name: data.name,
            email: data.email,
            phone_number: data.phone_number,
            disabled: data.disabled,
            date_joined: data.date_joined,
        }
    }

    /// Build a transient account with the given name and default values elsewhere.
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_data(AccountData {
            name: name.into(),
            ..AccountData::default()
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_data(&self) -> AccountData {
        AccountData {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            disabled: self.disabled,
            date_joined: self.date_joined,
        }
    }

    /// Serialize the data fields (never `id`) into a flat mapping.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(5);
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("email".to_string(), Value::String(self.email.clone()));
        map.insert(
            "phone_number".to_string(),
            Value::String(self.phone_number.clone()),
        );
        map.insert("disabled".to_string(), Value::Bool(self.disabled));
        map.insert(
            "date_joined".to_string(),
            Value::String(iso_date::format(&self.date_joined)),
        );
        map
    }

    /// Set the data fields present in `data`. `id` is never touched and unknown
    /// keys are ignored. A `null`, a wrongly typed value or a date that is not
    /// `YYYY-MM-DD` fails with `DataValidation` and nothing is changed.
    pub fn from_dict(&mut self, data: &Map<String, Value>) -> Result<()> {
        let patch: AccountPatch = serde_json::from_value(Value::Object(data.clone()))
            .map_err(|e| AccountError::data_validation(format!("Invalid account data: {}", e)))?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(disabled) = patch.disabled {
            self.disabled = disabled;
        }
        if let Some(date_joined) = patch.date_joined {
            self.date_joined = date_joined;
        }
        Ok(())
    }

    /// Insert this account as a new row and record the store-assigned id.
    pub async fn create<S: AccountStorage + ?Sized>(&mut self, storage: &S) -> Result<()> {
        let id = storage.insert(&self.to_data()).await?;
        self.id = Some(id);
        Ok(())
    }

    /// Persist the current field values to the existing row.
    pub async fn update<S: AccountStorage + ?Sized>(&self, storage: &S) -> Result<()> {
        let id = self
            .id
            .ok_or_else(|| AccountError::data_validation("Update called with empty ID field"))?;
        storage.update(id, &self.to_data()).await
    }

    pub async fn delete<S: AccountStorage + ?Sized>(&self, storage: &S) -> Result<()> {
        let id = self
            .id
            .ok_or_else(|| AccountError::data_validation("Delete called with empty ID field"))?;
        storage.delete(id).await
    }

    pub async fn all<S: AccountStorage + ?Sized>(storage: &S) -> Result<Vec<Account>> {
        storage.all().await
    }

    pub async fn find<S: AccountStorage + ?Sized>(
        storage: &S,
        id: AccountId,
    ) -> Result<Option<Account>> {
        storage.find(id).await
    }

    pub async fn find_by_name<S: AccountStorage + ?Sized>(
        storage: &S,
        name: &str,
    ) -> Result<Vec<Account>> {
        storage.find_by_name(name).await
    }

    pub async fn count<S: AccountStorage + ?Sized>(storage: &S) -> Result<u64> {
        storage.count().await
    }
}
