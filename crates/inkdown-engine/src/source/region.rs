//! Zero-copy string views with excludable sub-ranges.

use std::borrow::Cow;
use std::fmt;

/// A byte range `[start, end)` in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    fn intersects(self, start: usize, end: usize) -> bool {
        self.start < end && self.end > start
    }
}

/// An immutable view `[start, end)` over a backing string.
///
/// A region may carry *taints*: sub-ranges hidden from extraction while
/// staying present in index space. `char_at`, `substring` and the `Display`
/// impl skip tainted bytes; `sub_region` keeps offsets stable, so scanner
/// positions survive re-slicing. The untainted path allocates nothing.
///
/// All public offsets are region-relative byte positions. Taints are stored
/// in absolute source coordinates internally, sorted and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'s> {
    source: &'s str,
    start: usize,
    end: usize,
    taints: Vec<Span>,
}

impl<'s> Region<'s> {
    /// A view over the whole of `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            start: 0,
            end: source.len(),
            taints: Vec::new(),
        }
    }

    /// Width in bytes, tainted bytes included (index space is preserved).
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute start offset in the backing string.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Absolute end offset in the backing string.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn is_tainted(&self) -> bool {
        !self.taints.is_empty()
    }

    /// The raw window text, tainted bytes included. Scanning primitives work
    /// on this; extraction goes through [`Region::substring`].
    #[must_use]
    pub fn raw(&self) -> &'s str {
        &self.source[self.start..self.end]
    }

    /// The character starting at relative byte offset `i`, or `None` when
    /// `i` is out of bounds or falls inside a tainted interval.
    #[must_use]
    pub fn char_at(&self, i: usize) -> Option<char> {
        if i >= self.len() {
            return None;
        }
        let abs = self.start + i;
        if self.taints.iter().any(|t| t.intersects(abs, abs + 1)) {
            return None;
        }
        self.source[abs..].chars().next()
    }

    /// Extract `[from, to)`, skipping tainted intervals. Borrows from the
    /// backing string when no taint intersects the window.
    #[must_use]
    pub fn substring(&self, from: usize, to: usize) -> Cow<'s, str> {
        debug_assert!(from <= to && to <= self.len());
        let a = self.start + from;
        let b = self.start + to;
        if !self.taints.iter().any(|t| t.intersects(a, b)) {
            return Cow::Borrowed(&self.source[a..b]);
        }
        let mut out = String::new();
        let mut pos = a;
        for t in &self.taints {
            if !t.intersects(a, b) {
                continue;
            }
            if t.start > pos {
                out.push_str(&self.source[pos..t.start.min(b)]);
            }
            pos = pos.max(t.end);
        }
        if pos < b {
            out.push_str(&self.source[pos..b]);
        }
        Cow::Owned(out)
    }

    /// Extract the whole region, skipping taints.
    #[must_use]
    pub fn to_cow(&self) -> Cow<'s, str> {
        self.substring(0, self.len())
    }

    /// A narrower view `[from, to)`. Taints still overlapping the new window
    /// are kept (clamped); when none survive the result is a plain region.
    #[must_use]
    pub fn sub_region(&self, from: usize, to: usize) -> Region<'s> {
        debug_assert!(from <= to && to <= self.len());
        let a = self.start + from;
        let b = self.start + to;
        let taints = self
            .taints
            .iter()
            .filter(|t| t.intersects(a, b))
            .map(|t| Span {
                start: t.start.max(a),
                end: t.end.min(b),
            })
            .collect();
        Region {
            source: self.source,
            start: a,
            end: b,
            taints,
        }
    }

    /// Mark `[from, to)` as excluded from extraction. Returns an unchanged
    /// clone when the interval does not intersect this region. Tainting is
    /// idempotent: overlapping intervals merge.
    #[must_use]
    pub fn taint(&self, from: usize, to: usize) -> Region<'s> {
        if to <= from {
            return self.clone();
        }
        let a = self.start.saturating_add(from);
        let b = self.start.saturating_add(to);
        if !(a < self.end && b > self.start) {
            return self.clone();
        }
        let clamped = Span {
            start: a.max(self.start),
            end: b.min(self.end),
        };
        let mut taints = self.taints.clone();
        taints.push(clamped);
        taints.sort_by_key(|t| (t.start, t.end));
        let mut merged: Vec<Span> = Vec::with_capacity(taints.len());
        for t in taints {
            match merged.last_mut() {
                Some(last) if t.start <= last.end => last.end = last.end.max(t.end),
                _ => merged.push(t),
            }
        }
        Region {
            source: self.source,
            start: self.start,
            end: self.end,
            taints: merged,
        }
    }

    /// The maximal contiguous non-tainted spans, as plain regions in order.
    #[must_use]
    pub fn untaint(&self) -> Vec<Region<'s>> {
        if self.taints.is_empty() {
            return vec![self.clone()];
        }
        let mut out = Vec::new();
        let mut pos = self.start;
        for t in &self.taints {
            if t.start > pos {
                out.push(Region {
                    source: self.source,
                    start: pos,
                    end: t.start,
                    taints: Vec::new(),
                });
            }
            pos = pos.max(t.end);
        }
        if pos < self.end {
            out.push(Region {
                source: self.source,
                start: pos,
                end: self.end,
                taints: Vec::new(),
            });
        }
        out
    }

    /// Drop trailing raw whitespace (taints at the old end are filtered out
    /// by `sub_region`).
    #[must_use]
    pub fn trim_end_whitespace(&self) -> Region<'s> {
        let raw = self.raw();
        let end = raw.trim_end().len();
        self.sub_region(0, end)
    }

    /// Drop leading raw spaces and tabs.
    #[must_use]
    pub fn trim_start_spaces(&self) -> Region<'s> {
        let raw = self.raw().as_bytes();
        let mut i = 0;
        while i < raw.len() && (raw[i] == b' ' || raw[i] == b'\t') {
            i += 1;
        }
        self.sub_region(i, self.len())
    }
}

impl fmt::Display for Region<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_region_extracts_whole_window() {
        let r = Region::new("hello world");
        assert_eq!(r.len(), 11);
        assert_eq!(r.to_cow(), "hello world");
        assert!(matches!(r.to_cow(), Cow::Borrowed(_)));
    }

    #[test]
    fn sub_region_narrows_the_view() {
        let r = Region::new("hello world").sub_region(6, 11);
        assert_eq!(r.to_cow(), "world");
        assert_eq!(r.start(), 6);
        assert_eq!(r.char_at(0), Some('w'));
    }

    #[test]
    fn taint_removes_interval_from_extraction() {
        let r = Region::new("heading {#top}");
        let t = r.taint(8, 14);
        assert_eq!(t.to_cow(), "heading ");
        // index space is preserved
        assert_eq!(t.len(), 14);
        assert_eq!(t.char_at(0), Some('h'));
        assert_eq!(t.char_at(9), None);
    }

    #[test]
    fn taint_equals_tostring_with_interval_removed() {
        let src = "abcdefghij";
        let r = Region::new(src);
        for a in 0..src.len() {
            for b in a..=src.len() {
                let expect = format!("{}{}", &src[..a], &src[b..]);
                assert_eq!(r.taint(a, b).to_cow(), expect, "taint({a},{b})");
            }
        }
    }

    #[test]
    fn taint_is_idempotent() {
        let r = Region::new("abcdef");
        let once = r.taint(1, 3);
        let twice = once.taint(1, 3);
        assert_eq!(once, twice);
        assert_eq!(twice.to_cow(), "adef");
    }

    #[test]
    fn overlapping_taints_merge() {
        let r = Region::new("abcdefgh").taint(1, 4).taint(3, 6);
        assert_eq!(r.to_cow(), "agh");
        assert_eq!(r.untaint().len(), 2);
    }

    #[test]
    fn taint_outside_window_is_a_noop() {
        let r = Region::new("abcdef").sub_region(0, 3);
        let t = r.taint(3, 5);
        assert!(!t.is_tainted());
        assert_eq!(t.to_cow(), "abc");
    }

    #[test]
    fn taint_then_sub_region_commutes_with_sub_region_then_taint() {
        let src = "0123456789";
        let r = Region::new(src);
        // taint [2,6) then narrow to [3,8)  ==  narrow then taint the overlap
        let a = r.taint(2, 6).sub_region(3, 8);
        let b = r.sub_region(3, 8).taint(0, 3);
        assert_eq!(a.to_cow(), b.to_cow());
        assert_eq!(a, b);
    }

    #[test]
    fn sub_region_drops_taints_outside_new_bounds() {
        let r = Region::new("0123456789").taint(1, 3);
        let s = r.sub_region(4, 9);
        assert!(!s.is_tainted());
        assert_eq!(s.to_cow(), "45678");
    }

    #[test]
    fn untaint_returns_maximal_plain_pieces() {
        let r = Region::new("aa__bb__cc").taint(2, 4).taint(6, 8);
        let pieces = r.untaint();
        let texts: Vec<_> = pieces.iter().map(|p| p.to_cow()).collect();
        assert_eq!(texts, vec!["aa", "bb", "cc"]);
        assert!(pieces.iter().all(|p| !p.is_tainted()));
    }

    #[test]
    fn untaint_of_plain_region_is_itself() {
        let r = Region::new("abc");
        assert_eq!(r.untaint(), vec![r.clone()]);
    }

    #[test]
    fn substring_stitches_around_taints() {
        let r = Region::new("one {x} two").taint(4, 7);
        assert_eq!(r.substring(0, r.len()), "one  two");
        assert_eq!(r.substring(0, 5), "one ");
        assert_eq!(r.substring(5, r.len()), " two");
    }

    #[test]
    fn trim_helpers() {
        let r = Region::new("  text  \n\n");
        assert_eq!(r.trim_start_spaces().to_cow(), "text  \n\n");
        assert_eq!(r.trim_end_whitespace().to_cow(), "  text");
    }
}
