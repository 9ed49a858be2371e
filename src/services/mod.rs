pub mod password;
pub use password::HashParams;

pub mod token;
pub use token::{Claims, TokenError, TokenIssuer};

pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountError, AccountService, SignInResult, UserProfile};
pub use account_service_impl::DefaultAccountService;
