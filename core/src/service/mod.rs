pub mod dto;
pub mod workload_service;
