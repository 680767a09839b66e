//! Fragments and the sibling merge pass.
//!
//! Every block renders on its own, so a three-item bulleted list arrives as
//! three fragments:
//! ```html
//! <ul><li>One</li></ul>
//! <ul><li>Two</li></ul>
//! <ul><li>Three</li></ul>
//! ```
//!
//! The merge pass fuses adjacent fragments of the same group by moving the
//! right fragment's items into the left one, so the document gets a single
//! `<ul>` with three items. Checklists are fused the same way.

/// List flavour. Ordered and unordered lists never merge with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Grouping class of a fragment, used only by the merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Stand-alone markup; never merged.
    Single,
    List(ListKind),
    Checklist,
}

impl Group {
    fn is_mergeable(self) -> bool {
        !matches!(self, Group::Single)
    }

    fn open_tag(self) -> &'static str {
        match self {
            Group::Single => "",
            Group::List(ListKind::Ordered) => "<ol>",
            Group::List(ListKind::Unordered) => "<ul>",
            Group::Checklist => "<div class=\"checklist\">",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Group::Single => "",
            Group::List(ListKind::Ordered) => "</ol>",
            Group::List(ListKind::Unordered) => "</ul>",
            Group::Checklist => "</div>",
        }
    }
}

/// Markup produced for one block (or, after merging, a run of blocks).
///
/// Grouped fragments hold their items without the shared container, which is
/// added when the fragment is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub group: Group,
    pub items: Vec<String>,
}

impl Fragment {
    pub fn single(markup: impl Into<String>) -> Self {
        Self {
            group: Group::Single,
            items: vec![markup.into()],
        }
    }

    pub fn list_item(kind: ListKind, item: impl Into<String>) -> Self {
        Self {
            group: Group::List(kind),
            items: vec![item.into()],
        }
    }

    pub fn checklist_item(item: impl Into<String>) -> Self {
        Self {
            group: Group::Checklist,
            items: vec![item.into()],
        }
    }

    /// Append this fragment's HTML to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str(self.group.open_tag());
        for item in &self.items {
            out.push_str(item);
        }
        out.push_str(self.group.close_tag());
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

/// Fuse runs of adjacent fragments that share a mergeable group.
pub fn merge_fragments(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut merged: Vec<Fragment> = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        if let Some(last) = merged.last_mut()
            && can_merge(last, &fragment)
        {
            last.items.extend(fragment.items);
            continue;
        }
        merged.push(fragment);
    }

    merged
}

fn can_merge(left: &Fragment, right: &Fragment) -> bool {
    left.group.is_mergeable() && left.group == right.group
}

/// Merge and serialize a fragment list.
pub fn fragments_to_html(fragments: Vec<Fragment>) -> String {
    let mut out = String::new();
    for fragment in merge_fragments(fragments) {
        fragment.write_to(&mut out);
    }
    out
}
