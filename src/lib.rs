//! Ideabank - Crowdsourced Idea Platform
//!
//! This crate implements idea submission, per-requester voting, and
//! collaborative additions with comment threads, exposed over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
