pub mod memory_availability_cache;
