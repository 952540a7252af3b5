mod destination;
mod slot;
