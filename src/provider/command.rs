pub mod fetch_availability_cmd;
