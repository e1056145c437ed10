use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

use crate::domain::models::account::ResetCode;
use crate::infrastructure::models::account::ACCOUNT;

pub const RESET_CODE: &str = "reset_code";

#[derive(Debug, Serialize, Deserialize)]
pub struct SurrealResetCode {
    account: Thing,
    code: String,
    expires_at: Datetime,
}

impl From<ResetCode> for SurrealResetCode {
    fn from(reset_code: ResetCode) -> Self {
        SurrealResetCode {
            account: Thing::from((ACCOUNT, reset_code.account_id.as_str())),
            code: reset_code.code,
            expires_at: Datetime::from(reset_code.expires_at),
        }
    }
}

impl From<SurrealResetCode> for ResetCode {
    fn from(reset_code: SurrealResetCode) -> Self {
        ResetCode {
            account_id: reset_code.account.id.to_raw(),
            code: reset_code.code,
            expires_at: reset_code.expires_at.0,
        }
    }
}
