mod files;
mod logging;
mod marks;
mod sync;
