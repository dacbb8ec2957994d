include!(concat!(env!("OUT_DIR"), "/ext.rs"));
