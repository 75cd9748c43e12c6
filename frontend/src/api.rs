use gloo_net::http::{Request, RequestBuilder};
use serde::{Deserialize, Serialize};

pub const API_BASE_URL: &str = "http://localhost:4000";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct ExpenseList {
    pub data: Vec<Expense>,
    pub pagination: Pagination,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct CategorySum {
    pub category: String,
    pub sum: f64,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub sum: f64,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_this_month: f64,
    pub by_category: Vec<CategorySum>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Clone, Serialize)]
pub struct ExpensePayload {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

/// Pulls the backend's error message out of a failed response, falling back
/// to a generic one when the body is not the expected JSON shape.
async fn error_message(resp: gloo_net::http::Response) -> String {
    match resp.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("Request failed ({})", resp.status()),
    }
}

async fn parse<T: for<'de> Deserialize<'de>>(
    resp: Result<gloo_net::http::Response, gloo_net::Error>,
) -> Result<T, String> {
    let resp = resp.map_err(|_| "Could not reach the server".to_string())?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    resp.json::<T>()
        .await
        .map_err(|_| "Unexpected response from the server".to_string())
}

pub async fn login(email: &str, password: &str) -> Result<AuthResponse, String> {
    let url = format!("{}/auth/login", API_BASE_URL);
    let body = serde_json::json!({ "email": email, "password": password });
    let req = Request::post(&url)
        .json(&body)
        .map_err(|_| "Could not encode request".to_string())?;
    parse(req.send().await).await
}

pub async fn signup(name: &str, email: &str, password: &str) -> Result<AuthResponse, String> {
    let url = format!("{}/auth/signup", API_BASE_URL);
    let body = serde_json::json!({ "name": name, "email": email, "password": password });
    let req = Request::post(&url)
        .json(&body)
        .map_err(|_| "Could not encode request".to_string())?;
    parse(req.send().await).await
}

pub async fn fetch_expenses(
    token: &str,
    page: i64,
    page_size: i64,
    search: &str,
) -> Result<ExpenseList, String> {
    let mut url = format!(
        "{}/expenses?page={}&pageSize={}",
        API_BASE_URL, page, page_size
    );
    if !search.is_empty() {
        let encoded: String = web_sys::js_sys::encode_uri_component(search).into();
        url.push_str("&search=");
        url.push_str(&encoded);
    }
    let req = bearer(Request::get(&url), token);
    parse(req.send().await).await
}

pub async fn create_expense(token: &str, payload: &ExpensePayload) -> Result<Expense, String> {
    let url = format!("{}/expenses", API_BASE_URL);
    let req = bearer(Request::post(&url), token)
        .json(payload)
        .map_err(|_| "Could not encode request".to_string())?;
    parse(req.send().await).await
}

pub async fn update_expense(
    token: &str,
    id: &str,
    payload: &ExpensePayload,
) -> Result<Expense, String> {
    let url = format!("{}/expenses/{}", API_BASE_URL, id);
    let req = bearer(Request::put(&url), token)
        .json(payload)
        .map_err(|_| "Could not encode request".to_string())?;
    parse(req.send().await).await
}

pub async fn delete_expense(token: &str, id: &str) -> Result<(), String> {
    let url = format!("{}/expenses/{}", API_BASE_URL, id);
    let resp = bearer(Request::delete(&url), token)
        .send()
        .await
        .map_err(|_| "Could not reach the server".to_string())?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    Ok(())
}

pub async fn fetch_monthly_analytics(token: &str) -> Result<MonthlySummary, String> {
    let url = format!("{}/analytics/monthly", API_BASE_URL);
    let req = bearer(Request::get(&url), token);
    parse(req.send().await).await
}
