//! WebDoctor - Website diagnostic chatbot
//!
//! Classifies a user's website problem with a language model, asks
//! clarifying questions, summarizes the conversation and prepares a
//! diagnostic report that can be emailed to the user.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
