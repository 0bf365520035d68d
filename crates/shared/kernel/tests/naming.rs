use ggp_kernel::prelude::*;
use proptest::prelude::*;

fn group(name: &str) -> GroupName {
    GroupName::try_from(name).expect("non-empty group")
}

#[test]
fn archive_names_end_with_kind_group_and_tar() {
    let constants = GgConstants::default();
    let variables = GgVariables::new(&constants);
    let g = group("mygroup");

    assert!(variables.archive_name(&g, ArchiveKind::Ggd).ends_with("ggd.mygroup.tar"));
    assert!(variables.archive_name(&g, ArchiveKind::Oem).ends_with("oem.mygroup.tar"));
    assert!(variables.ggd_archive_name(&g).starts_with(constants.build_directory()));
}

#[test]
fn distinct_derivations_do_not_collide() {
    let constants = GgConstants::default();
    let variables = GgVariables::new(&constants);
    let g = group("site");

    let names = [
        variables.core_thing_name(&g).into_inner(),
        variables.core_definition_name(&g),
        variables.core_policy_name(&g).into_inner(),
        variables.device_definition_name(&g),
        variables.ggd_archive_name(&g),
        variables.oem_archive_name(&g),
        variables.gg_sh_script_name(&g),
    ];

    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn shadow_filter_of_core_thing() {
    let constants = GgConstants::default();
    let variables = GgVariables::new(&constants);
    let thing = variables.core_thing_name(&group("line7"));

    assert_eq!(variables.device_shadow_topic_filter(&thing), "$aws/things/line7_Core/shadow/#");
}

proptest! {
    #[test]
    fn core_names_follow_suffix_scheme(raw in "\\PC{1,48}") {
        prop_assume!(!raw.trim().is_empty());
        let constants = GgConstants::default();
        let variables = GgVariables::new(&constants);
        let g = group(&raw);

        prop_assert_eq!(variables.core_policy_name(&g).into_inner(), format!("{raw}_Core_Policy"));
        prop_assert_eq!(variables.core_definition_name(&g), format!("{raw}_Core_Definition"));
    }

    #[test]
    fn derivations_are_referentially_transparent(raw in "[a-zA-Z0-9_.-]{1,32}") {
        let constants = GgConstants::default();
        let g = group(&raw);

        let first = GgVariables::new(&constants);
        let second = GgVariables::new(&constants);

        prop_assert_eq!(first.core_thing_name(&g), second.core_thing_name(&g));
        prop_assert_eq!(first.ggd_archive_name(&g), second.ggd_archive_name(&g));
        prop_assert_eq!(first.gg_sh_script_name(&g), second.gg_sh_script_name(&g));
        prop_assert_eq!(first.device_definition_name(&g), second.device_definition_name(&g));
    }

    #[test]
    fn gateway_host_accepts_any_region_token(raw in "\\PC{1,32}") {
        prop_assume!(!raw.trim().is_empty());
        let constants = GgConstants::default();
        let variables = GgVariables::new(&constants);
        let region = Region::try_from(raw.as_str()).unwrap();

        prop_assert_eq!(
            variables.gg_host(&region),
            format!("greengrass-ats.iot.{raw}.amazonaws.com")
        );
    }
}
