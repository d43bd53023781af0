pub mod registry;
pub mod resolvers;
pub mod system;
