pub mod configuration;

pub mod logging;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod interpolation;
}

pub mod property {
    pub mod propertyerror;
    pub mod property;
    pub mod constantproperty;
    pub mod callbackproperty;
    pub mod sampledproperty;
    pub mod compositeproperty;
}

pub mod time {
    pub mod simulationtime;
    pub mod timeinterval;
    pub mod timeintervalcollection;
}
