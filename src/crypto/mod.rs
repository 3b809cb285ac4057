//! Credential generation for provisioned Wialon users

pub mod password;

pub use password::{
    generate_wialon_password, generate_wialon_password_with, is_valid_wialon_password,
    is_wialon_alphabet, WialonPassword,
};
