//! Constants for PhonePe connector

// ===== API ENDPOINTS =====
pub const API_PAY_ENDPOINT: &str = "/pg/v1/pay";
pub const API_STATUS_ENDPOINT: &str = "/pg/v1/status";

// ===== PAYMENT INSTRUMENT TYPES =====
pub const PAY_PAGE: &str = "PAY_PAGE";
pub const UPI_INTENT: &str = "UPI_INTENT";
pub const UPI_COLLECT: &str = "UPI_COLLECT";
pub const UPI_QR: &str = "UPI_QR";
pub const CARD: &str = "CARD";
pub const NET_BANKING: &str = "NET_BANKING";

// ===== DEFAULT VALUES =====
pub const REDIRECT_MODE_POST: &str = "POST";
pub const CARD_AUTH_MODE: &str = "3DS";

// ===== CHECKSUM =====
pub const CHECKSUM_SEPARATOR: &str = "###";

// ===== CONTENT TYPES =====
pub const APPLICATION_JSON: &str = "application/json";

// ===== MERCHANT TRANSACTION ID =====
pub const MAX_MERCHANT_TRANSACTION_ID_LENGTH: usize = 35;

// ===== BASE URLS =====
pub const PRODUCTION_BASE_URL: &str = "https://api.phonepe.com/apis/hermes";
pub const SANDBOX_BASE_URL: &str = "https://api-preprod.phonepe.com/apis/pg-sandbox";
