pub mod activate_cmd;
