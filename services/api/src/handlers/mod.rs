pub mod activity;
pub mod completion;
pub mod health;
pub mod otp;
pub mod participation;
pub mod review;
pub mod user;
