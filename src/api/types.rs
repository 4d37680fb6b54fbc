use chrono::NaiveDate;
use serde::Serialize;

use crate::db::CaseWithClient;
use crate::entities::clients;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ClientDto {
    pub id: i32,
    pub name: String,
    pub phone_number: Option<String>,
    pub contact_details: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<clients::Model> for ClientDto {
    fn from(model: clients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone_number: model.phone_number,
            contact_details: model.contact_details,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaseDto {
    pub id: i32,
    pub case_number: String,
    pub court_name: Option<String>,
    pub case_title: Option<String>,
    pub case_type: Option<String>,
    pub client_id: i32,
    pub client_name: Option<String>,
    pub opponent_name: Option<String>,
    pub opponent_advocate: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub current_stage: Option<String>,
    pub next_hearing_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CaseWithClient> for CaseDto {
    fn from(row: CaseWithClient) -> Self {
        let client_name = row.client.map(|c| c.name);
        let case = row.case;
        Self {
            id: case.id,
            case_number: case.case_number,
            court_name: case.court_name,
            case_title: case.case_title,
            case_type: case.case_type,
            client_id: case.client_id,
            client_name,
            opponent_name: case.opponent_name,
            opponent_advocate: case.opponent_advocate,
            filing_date: case.filing_date,
            current_stage: case.current_stage,
            next_hearing_date: case.next_hearing_date,
            status: case.status,
            notes: case.notes,
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardDto {
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
    pub upcoming_hearings: Vec<CaseDto>,
    pub active_count: u64,
    pub closed_count: u64,
}
