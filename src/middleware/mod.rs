pub mod csrf_middleware;
pub mod logger_middleware;
