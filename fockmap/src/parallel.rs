//! Order-preserving maps that run on the rayon pool when the `parallel` feature is on.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
pub(crate) fn map_range<T, Map>(count: usize, map: Map) -> Vec<T>
where
    T: Send,
    Map: Fn(usize) -> T + Send + Sync,
{
    (0..count).into_par_iter().map(map).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_range<T, Map>(count: usize, map: Map) -> Vec<T>
where
    T: Send,
    Map: Fn(usize) -> T + Send + Sync,
{
    (0..count).map(map).collect()
}

#[cfg(feature = "parallel")]
pub(crate) fn map_slice<Item, T, Map>(items: &[Item], map: Map) -> Vec<T>
where
    Item: Sync,
    T: Send,
    Map: Fn(&Item) -> T + Send + Sync,
{
    items.par_iter().map(map).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_slice<Item, T, Map>(items: &[Item], map: Map) -> Vec<T>
where
    Item: Sync,
    T: Send,
    Map: Fn(&Item) -> T + Send + Sync,
{
    items.iter().map(map).collect()
}
