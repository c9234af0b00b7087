pub mod phonepe;
pub use self::phonepe::Phonepe;
