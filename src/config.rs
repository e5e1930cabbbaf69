use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub sms_gateway_url: String,
    pub sms_gateway_token: String,
    pub sms_sign_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            sms_gateway_url: env::var("SMS_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:8100/api/v1/sms/send".to_string()),
            sms_gateway_token: env::var("SMS_GATEWAY_TOKEN").unwrap_or_default(),
            sms_sign_name: env::var("SMS_SIGN_NAME")
                .unwrap_or_else(|_| "XinYu Health".to_string()),
        }
    }
}
