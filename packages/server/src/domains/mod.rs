// Domain modules - each domain owns its models, machines, actions, and effects

pub mod posts;
