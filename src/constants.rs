/// Stored as the password hash of temporary users. It is not a PHC string,
/// so no password ever verifies against it.
pub const TEMP_PASSWORD_SENTINEL: &str = "temp_password";

pub mod tokens {

    pub const DEFAULT_EXPIRY_SECONDS: u64 = 86_400;

    pub const DEFAULT_SECRET: &str = "change-me";
}

pub mod database {
    use std::time::Duration;

    pub const CONNECT_MAX_ATTEMPTS: u32 = 10;

    pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(1);
}

pub mod messages {

    pub const USER_REGISTERED: &str = "User was registered successfully";

    pub const INVALID_CREDENTIALS: &str = "Invalid username/password combination";
}
