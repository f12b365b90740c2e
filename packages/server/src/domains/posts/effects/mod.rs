// IO side effects for the posts domain

pub mod dispatch;
