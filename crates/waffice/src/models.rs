//! Roster record types as exported by the dashboard backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waffice_listview::{Listable, Number, RecordId, Timestamp, Value};

/// Membership level shown when a member record carries none.
pub const DEFAULT_ROLE: &str = "활동회원";

/// Enrollment status shown when a member record carries none.
pub const DEFAULT_AFFILIATION: &str = "학부생";

/// Membership levels offered by the role column filter.
pub const ROLE_OPTIONS: [&str; 4] = ["활동회원", "정회원", "준회원", "미가입"];

/// Enrollment statuses offered by the affiliation column filter.
pub const AFFILIATION_OPTIONS: [&str; 3] = ["학부생", "휴학생", "졸업생"];

/// Access rights offered by the access-right column filter.
pub const ACCESS_RIGHT_OPTIONS: [&str; 2] = ["운영진", "팀장"];

/// Account state of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Suspended => "suspended",
        }
    }
}

/// A club member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    /// Cohort label such as "23.5기".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub access_rights: Vec<String>,
    #[serde(default)]
    pub status: MemberStatus,
    pub join_date: DateTime<Utc>,
}

impl Member {
    /// Role as displayed, falling back to [`DEFAULT_ROLE`].
    pub fn display_role(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }

    /// Affiliation as displayed, falling back to [`DEFAULT_AFFILIATION`].
    pub fn display_affiliation(&self) -> &str {
        self.affiliation.as_deref().unwrap_or(DEFAULT_AFFILIATION)
    }
}

impl Listable for Member {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::from(self.id)),
            "name" => Value::String(&self.name),
            "email" => Value::String(&self.email),
            "phone" => Value::from_opt_str(self.phone.as_deref()),
            "github_username" => Value::from_opt_str(self.github_username.as_deref()),
            "generation" => Value::from_opt_str(self.generation.as_deref()),
            "role" => Value::from_opt_str(self.role.as_deref()),
            "affiliation" => Value::from_opt_str(self.affiliation.as_deref()),
            "access_rights" => Value::Tags(&self.access_rights),
            "status" => Value::String(self.status.as_str()),
            "join_date" => {
                Value::Timestamp(Timestamp::from_millis(self.join_date.timestamp_millis()))
            }
            _ => Value::None,
        }
    }
}

/// A pending membership application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: RecordId,
    pub name: String,
    pub generation: String,
    pub email: String,
    pub github_username: String,
    pub application_date: DateTime<Utc>,
    pub status: String,
}

impl Listable for Application {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::from(self.id)),
            "name" => Value::String(&self.name),
            "generation" => Value::String(&self.generation),
            "email" => Value::String(&self.email),
            "github_username" => Value::String(&self.github_username),
            "application_date" => Value::Timestamp(Timestamp::from_millis(
                self.application_date.timestamp_millis(),
            )),
            "status" => Value::String(&self.status),
            _ => Value::None,
        }
    }
}

/// Rows that can be drawn as a text table.
pub trait TableRow: Listable + Serialize {
    /// Column headings, in display order.
    const HEADERS: &'static [&'static str];

    /// Cell texts, one per heading.
    fn cells(&self) -> Vec<String>;
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl TableRow for Member {
    const HEADERS: &'static [&'static str] = &[
        "이름",
        "기수",
        "이메일",
        "Github 아이디",
        "계정 생성일",
        "자격",
        "재학여부",
        "접근 권한",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(self.generation.as_deref()),
            self.email.clone(),
            or_dash(self.github_username.as_deref()),
            self.join_date.format("%Y. %m. %d.").to_string(),
            self.display_role().to_string(),
            self.display_affiliation().to_string(),
            if self.access_rights.is_empty() {
                "없음".to_string()
            } else {
                self.access_rights.join(", ")
            },
        ]
    }
}

impl TableRow for Application {
    const HEADERS: &'static [&'static str] = &[
        "이름",
        "기수",
        "이메일",
        "Github 아이디",
        "가입 신청일",
        "승인여부",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.generation.clone(),
            self.email.clone(),
            self.github_username.clone(),
            self.application_date.format("%Y. %m. %d.").to_string(),
            self.status.clone(),
        ]
    }
}
