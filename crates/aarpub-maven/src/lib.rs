//! Maven publication pipeline: companion jars, POM generation, signing,
//! repository layout with checksums and `maven-metadata.xml`, bundling,
//! and the Central Publisher Portal client.

pub mod assemble;
pub mod bundle;
pub mod central;
pub mod checksum;
pub mod companion;
pub mod install;
pub mod metadata;
pub mod pom;
pub mod repository;
pub mod sign;

mod xml;
