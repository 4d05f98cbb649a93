use serde::Serialize;

/// Row of `employees`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub position: Option<String>,
    pub department_id: Option<i64>,
    pub access_level_id: Option<i64>,
}

/// Row of `departments`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub efficiency: Option<f64>,
    pub manager_id: Option<i64>,
}

/// Row of `department_managers`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartmentManager {
    pub id: i64,
    pub full_name: String,
    pub access_level_id: Option<i64>,
}

/// Status of an employment contract (`employment_contracts.status`).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ContractStatus {
    Active,
    Terminated,
    OnHold,
}

impl ContractStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ContractStatus::Active => "active",
            ContractStatus::Terminated => "terminated",
            ContractStatus::OnHold => "on_hold",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ContractStatus::Active),
            "terminated" => Some(ContractStatus::Terminated),
            "on_hold" => Some(ContractStatus::OnHold),
            _ => None,
        }
    }
}
