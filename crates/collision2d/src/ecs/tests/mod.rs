//! ECS-level tests of collider queries against a populated world

mod custom_facade;
