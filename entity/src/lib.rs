//! Sea-ORM entities for the HRIS relational schema.
//!
//! `person` is the shared identity base; `employee`, `hr_employee` and
//! `external_user` are mutually exclusive specializations keyed by the
//! person's primary key.

pub mod employee;
pub mod employee_project;
pub mod external_request;
pub mod external_user;
pub mod hr_employee;
pub mod leave_request;
pub mod person;
pub mod project;
pub mod role;
