//! Index fixtures for completion tests.

use nestor::base::{NestingPath, Span};
use nestor::ide::ReferenceContext;
use nestor::index::{EntryLocation, IndexEntry, MemoryIndex};

/// Span on a single line.
pub fn line_span(line: usize, start: usize, end: usize) -> Span {
    Span::from_coords(line, start, line, end)
}

/// Context nested inside `segments`, outermost first.
pub fn context_in(segments: &[&str]) -> ReferenceContext {
    ReferenceContext::new(NestingPath::new(segments.iter().copied()))
}

/// `Bar` at the top level and `Foo::Bar` nested in `Foo`.
pub fn shadowing_index() -> MemoryIndex {
    [
        IndexEntry::class("Bar").with_location(located("bar.rb")),
        IndexEntry::module("Foo").with_location(located("foo.rb")),
        IndexEntry::class("Foo::Bar").with_location(located("foo/bar.rb")),
    ]
    .into_iter()
    .collect()
}

/// Nested modules for references that spell out their own scope.
pub fn nested_scopes_index() -> MemoryIndex {
    [
        IndexEntry::class("Bar"),
        IndexEntry::module("Foo"),
        IndexEntry::class("Foo::Bar"),
        IndexEntry::module("A"),
        IndexEntry::module("A::B"),
        IndexEntry::class("A::B::Xylo"),
    ]
    .into_iter()
    .collect()
}

/// `Foo` is an alias of the real namespace `Baz`.
pub fn aliased_index() -> MemoryIndex {
    [
        IndexEntry::module("Baz"),
        IndexEntry::class("Baz::Qux").with_comments("The real thing."),
        IndexEntry::constant("Baz::QUOTA"),
        IndexEntry::alias("Foo", "Baz"),
    ]
    .into_iter()
    .collect()
}

/// A small shop model with members, mixins and a private constant.
pub fn shop_index() -> MemoryIndex {
    let mut index: MemoryIndex = [
        IndexEntry::module("Shop"),
        IndexEntry::module("Shop::Pricing"),
        IndexEntry::constant("Shop::TAX_RATE").private(),
        IndexEntry::constant("Shop::TAGLINE"),
        IndexEntry::class("Shop::Cart").with_mixin("Pricing"),
        IndexEntry::class("Shop::Cart::Line"),
        IndexEntry::method("total", "Shop::Pricing").with_signature("()"),
        IndexEntry::method("add", "Shop::Cart").with_signature("(item, qty = 1)"),
        IndexEntry::method("apply_coupon", "Shop::Cart").with_signature("(code)"),
        IndexEntry::method("audit_log", "Shop::Cart").private(),
        IndexEntry::field("@items", "Shop::Cart"),
        IndexEntry::field("@item_count", "Shop::Cart"),
        IndexEntry::field("@discount", "Shop::Cart"),
    ]
    .into_iter()
    .collect();
    index.add_require_path("json", None);
    index.add_require_path("json/add/core", None);
    index.add_require_path("set", None);
    index
}

fn located(file: &str) -> EntryLocation {
    EntryLocation::new(format!("/project/lib/{file}"), Span::from_coords(0, 0, 3, 3))
}
