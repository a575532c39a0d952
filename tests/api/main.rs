mod health_check;
mod login;
mod orders;
mod store_pg;
mod users;

// black-box tests are most robust, as they reflect exactly how clients
// interact with the API (request type, path, headers); everything here goes
// through reqwest against a real listener, with only the store swapped for
// the in-memory double.
//
// all tests live in this one dir (tests/api/main.rs + one file per surface)
// because each top-level file under tests/ becomes its own binary: "While
// each executable is compiled in parallel, the linking phase is instead
// entirely sequential!"
