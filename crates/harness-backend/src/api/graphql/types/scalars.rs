use super::schema;

pub type DateTime = chrono::DateTime<chrono::Utc>;

cynic::impl_scalar!(chrono::DateTime<chrono::Utc>, schema::AWSDateTime);
cynic::impl_scalar!(url::Url, schema::AWSURL);

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Email(pub String);

cynic::impl_scalar!(Email, schema::AWSEmail);

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct PhoneNumber(pub String);

cynic::impl_scalar!(PhoneNumber, schema::AWSPhone);
