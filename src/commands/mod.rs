/*!
 * CLI subcommands that work on local state rather than the service
 */

pub mod init;
