use super::ApiClient;
use crate::error::Result;
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};

pub async fn list(api: &ApiClient, token: Option<&str>) -> Result<Vec<LeaveRequest>> {
    api.get_json("/leave", token).await
}

pub async fn submit(api: &ApiClient, request: &NewLeaveRequest, token: Option<&str>) -> Result<()> {
    api.post_unit("/leave/request", request, token).await
}

pub async fn cancel(api: &ApiClient, id: &str, token: Option<&str>) -> Result<()> {
    api.delete_unit(&format!("/leave/{id}"), token).await
}
