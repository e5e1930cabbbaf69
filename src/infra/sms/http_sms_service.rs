use crate::domain::ports::SmsService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

// Aliyun template ids carried over from the production SMS account.
const TEMPLATE_RECHARGE: &str = "SMS_488625041";
const TEMPLATE_CONSUMPTION: &str = "SMS_488640049";

/// Sends templated SMS through an HTTP gateway fronting the Aliyun SMS API.
pub struct HttpSmsService {
    client: Client,
    api_url: String,
    api_token: String,
    sign_name: String,
}

impl HttpSmsService {
    pub fn new(api_url: String, api_token: String, sign_name: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_token,
            sign_name,
        }
    }

    async fn send(
        &self,
        phone: &str,
        template_code: &str,
        template_param: serde_json::Value,
    ) -> Result<(), AppError> {
        let payload = SmsPayload {
            sign_name: &self.sign_name,
            template_code,
            phone_number: phone,
            template_param,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("SMS gateway request failed: {}", e);
                AppError::Internal
            })?;

        if !response.status().is_success() {
            error!(
                status = response.status().as_u16(),
                phone, template_code, "SMS gateway rejected message"
            );
            return Err(AppError::Internal);
        }

        info!(phone, template_code, "SMS dispatched");
        Ok(())
    }
}

#[derive(Serialize)]
struct SmsPayload<'a> {
    sign_name: &'a str,
    template_code: &'a str,
    phone_number: &'a str,
    template_param: serde_json::Value,
}

#[async_trait]
impl SmsService for HttpSmsService {
    async fn send_member_created(
        &self,
        phone: &str,
        _name: &str,
        balance: f64,
    ) -> Result<(), AppError> {
        // The recharge template doubles as the welcome message: the opening
        // balance is presented as the first recharge.
        self.send(
            phone,
            TEMPLATE_RECHARGE,
            json!({
                "recharge": balance.to_string(),
                "gift": "0",
                "balance": balance.to_string(),
            }),
        )
        .await
    }

    async fn send_recharge(
        &self,
        phone: &str,
        amount: f64,
        bonus: f64,
        balance: f64,
    ) -> Result<(), AppError> {
        self.send(
            phone,
            TEMPLATE_RECHARGE,
            json!({
                "recharge": amount.to_string(),
                "gift": bonus.to_string(),
                "balance": balance.to_string(),
            }),
        )
        .await
    }

    async fn send_consumption(
        &self,
        phone: &str,
        amount: f64,
        balance: f64,
    ) -> Result<(), AppError> {
        self.send(
            phone,
            TEMPLATE_CONSUMPTION,
            json!({
                "consumption": amount.to_string(),
                "balance": balance.to_string(),
            }),
        )
        .await
    }
}
