//! Product constants generated by the build script from `config.toml`.

#![allow(dead_code)]

include!(concat!(env!("OUT_DIR"), "/jvessel_config.rs"));
