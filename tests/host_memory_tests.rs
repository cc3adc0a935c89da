//! MemoryHost semantics: buffer list, filters, search state and signals.

use grep_filter::host::memory::CORE_BUFFER;
use grep_filter::host::{Host, HostError, MemoryHost, SessionStep, Signal};

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_new_host_has_core_buffer() {
    let host = MemoryHost::new();
    let buffers = host.buffers();
    assert_eq!(buffers.len(), 1);
    assert_eq!(buffers[0].full_name, CORE_BUFFER);
    assert_eq!(buffers[0].number, 1);
}

#[test]
fn test_buffers_sorted_by_number_with_merge_order_kept() {
    let mut host = MemoryHost::new();
    host.open_buffer("c", 4);
    host.open_buffer("a", 2);
    host.open_buffer("b", 2);

    let names: Vec<String> = host.buffers().into_iter().map(|b| b.full_name).collect();
    assert_eq!(names, [CORE_BUFFER, "a", "b", "c"]);
}

#[test]
fn test_open_existing_name_returns_same_buffer() {
    let mut host = MemoryHost::new();
    let first = host.open_buffer("a", 2);
    let second = host.open_buffer("a", 5);
    assert_eq!(first, second);
    assert_eq!(host.buffers().len(), 2);
}

#[test]
fn test_close_buffer() {
    let mut host = MemoryHost::new();
    let a = host.open_buffer("a", 2);
    assert!(host.close_buffer(a));
    assert!(!host.close_buffer(a));
    assert!(host.buffer(a).is_none());
}

#[test]
fn test_filter_del_missing_is_refused_but_logged() {
    let mut host = MemoryHost::new();
    host.command("/filter del nothing");
    assert_eq!(host.command_log(), ["/filter del nothing"]);
    assert_eq!(host.filters().count(), 0);
}

#[test]
fn test_invalid_regex_is_refused() {
    let mut host = MemoryHost::new();
    host.command("/filter add bad * * !unclosed(");
    assert!(!host.filter_exists("bad"));
}

#[test]
fn test_negated_filter_keeps_matching_lines() {
    let mut host = MemoryHost::new();
    let rust = host.open_buffer("irc.libera.#rust", 2);
    host.print(rust, "Error: borrow of moved value", &tags(&["irc_privmsg"]));
    host.print(rust, "thanks!", &tags(&["irc_privmsg"]));

    host.command("/filter add f irc.libera.#rust * !error");

    assert_eq!(host.visible_lines(rust), ["Error: borrow of moved value"]);
}

#[test]
fn test_bare_bang_hides_everything() {
    let mut host = MemoryHost::new();
    let rust = host.open_buffer("irc.libera.#rust", 2);
    host.print(rust, "one", &[]);
    host.print(rust, "two", &[]);

    host.command("/filter add f irc.libera.#rust * !");

    assert!(host.visible_lines(rust).is_empty());
}

#[test]
fn test_filter_only_applies_to_masked_buffers() {
    let mut host = MemoryHost::new();
    let rust = host.open_buffer("irc.libera.#rust", 2);
    let other = host.open_buffer("irc.libera.#other", 3);
    host.print(rust, "line", &[]);
    host.print(other, "line", &[]);

    host.command("/filter add f irc.libera.#rust * !");

    assert!(host.visible_lines(rust).is_empty());
    assert_eq!(host.visible_lines(other), ["line"]);
}

#[test]
fn test_tag_mask_limits_filter() {
    let mut host = MemoryHost::new();
    let rust = host.open_buffer("irc.libera.#rust", 2);
    host.print(rust, "joined", &tags(&["irc_join"]));
    host.print(rust, "said", &tags(&["irc_privmsg"]));

    host.command("/filter add joins * irc_join,irc_part *");

    assert_eq!(host.visible_lines(rust), ["said"]);
}

#[test]
fn test_search_saves_and_restores_input() {
    let mut host = MemoryHost::new();
    let rust = host.open_buffer("irc.libera.#rust", 2);
    host.set_input(rust, "draft");

    host.start_search(rust);
    let searching = host.buffer(rust).unwrap();
    assert!(searching.text_search);
    assert_eq!(searching.input, "");

    host.set_input(rust, "needle");
    host.stop_search(rust);
    let done = host.buffer(rust).unwrap();
    assert!(!done.text_search);
    assert_eq!(done.input, "draft");
}

#[test]
fn test_signals_queue_only_when_hooked() {
    let mut host = MemoryHost::new();
    let rust = host.open_buffer("irc.libera.#rust", 2);
    host.hook_signal(Signal::InputSearch);

    host.start_search(rust);
    host.set_input(rust, "x");
    host.start_search(rust); // already searching: no signal
    host.stop_search(rust);

    assert_eq!(
        host.drain_signals(),
        [(Signal::InputSearch, rust), (Signal::InputSearch, rust)]
    );
    assert!(host.drain_signals().is_empty());
}

#[test]
fn test_apply_resolves_buffer_names() {
    let mut host = MemoryHost::new();
    let opened = host
        .apply(&SessionStep::OpenBuffer {
            full_name: "irc.libera.#rust".to_string(),
            number: 2,
        })
        .unwrap();
    let searched = host
        .apply(&SessionStep::StartSearch {
            buffer: "irc.libera.#rust".to_string(),
        })
        .unwrap();
    assert_eq!(opened, searched);
    assert!(host.buffer(opened.unwrap()).unwrap().text_search);

    let closed = host
        .apply(&SessionStep::CloseBuffer {
            full_name: "irc.libera.#rust".to_string(),
        })
        .unwrap();
    assert_eq!(closed, None);
}

#[test]
fn test_apply_unknown_buffer_fails() {
    let mut host = MemoryHost::new();
    let result = host.apply(&SessionStep::StopSearch {
        buffer: "irc.nowhere.#void".to_string(),
    });
    assert!(matches!(result, Err(HostError::UnknownBuffer(name)) if name == "irc.nowhere.#void"));
}

#[test]
fn test_refused_registration() {
    let mut host = MemoryHost::new().refuse_registration();
    let info = grep_filter::plugin::script_info("grep_filter");
    assert!(!host.register(&info));
    assert!(host.registered().is_none());
}
