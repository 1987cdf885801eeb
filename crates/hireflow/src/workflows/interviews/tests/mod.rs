mod common;
mod eligibility;
