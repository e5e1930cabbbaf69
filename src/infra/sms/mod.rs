pub mod http_sms_service;
