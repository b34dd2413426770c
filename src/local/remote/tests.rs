//! Unit tests for remote URL parsing.

use rstest::rstest;

use super::{GitHubOrigin, parse_github_remote};
use crate::local::LocalDiscoveryError;

#[rstest]
#[case::scp("git@github.com:acme/widgets.git")]
#[case::scp_without_suffix("git@github.com:acme/widgets")]
#[case::scp_without_user("github.com:acme/widgets.git")]
#[case::https("https://github.com/acme/widgets.git")]
#[case::https_without_suffix("https://github.com/acme/widgets")]
#[case::https_trailing_slash("https://github.com/acme/widgets/")]
#[case::ssh_url("ssh://git@github.com/acme/widgets.git")]
#[case::mixed_case_host("git@GitHub.COM:acme/widgets.git")]
fn parses_github_com_remotes(#[case] input: &str) {
    let origin = parse_github_remote(input).expect("remote should parse");

    assert!(origin.is_github_com(), "expected github.com for {input}");
    assert_eq!(origin.owner(), "acme");
    assert_eq!(origin.repository(), "widgets");
    assert_eq!(origin.port(), None);
}

#[rstest]
#[case::scp("git@ghe.example.com:acme/widgets.git", None)]
#[case::https("https://ghe.example.com/acme/widgets", None)]
#[case::https_with_port("https://ghe.example.com:8443/acme/widgets.git", Some(8443))]
#[case::ssh_with_port("ssh://git@ghe.example.com:2222/acme/widgets.git", Some(2222))]
fn parses_enterprise_remotes(#[case] input: &str, #[case] port: Option<u16>) {
    let origin = parse_github_remote(input).expect("remote should parse");

    assert_eq!(
        origin,
        GitHubOrigin::Enterprise {
            host: "ghe.example.com".to_owned(),
            port,
            owner: "acme".to_owned(),
            repository: "widgets".to_owned(),
        }
    );
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   ")]
#[case::owner_only("https://github.com/acme")]
#[case::nested_path("https://github.com/acme/widgets/tree/main")]
#[case::bare_suffix("git@github.com:acme/.git")]
#[case::local_path("/srv/git/widgets.git")]
#[case::relative_path("../widgets")]
fn rejects_remotes_without_owner_and_repository(#[case] input: &str) {
    let result = parse_github_remote(input);

    assert_eq!(
        result,
        Err(LocalDiscoveryError::InvalidRemoteUrl {
            url: input.to_owned()
        })
    );
}
