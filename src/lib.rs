//! Mock Interviewer - AI-conducted mock coding interviews
//!
//! A candidate works one problem in a chat with a model acting as the
//! interviewer, may submit code for review, and on ending the interview
//! receives a structured scorecard.
//!
//! Layout follows ports and adapters:
//!
//! - `domain` - interviews, conversation turns, submissions, evaluations
//! - `ports` - repository and model gateway traits
//! - `adapters` - PostgreSQL, in-memory, Gemini, mock and HTTP implementations
//! - `application` - command/query handlers and the `InterviewFacade`
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
